//! # Gateway Core
//! 
//! Payment-session state machine, in-memory store and notification relay
//! of the mock mobile-money gateway.

pub mod domain;
pub mod error;
pub mod services;
pub mod store;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, NotificationError};
pub use services::{GatewayOptions, GatewayService, NotificationSender, PendingNotification};
pub use store::{SessionStore, StoreStats};
