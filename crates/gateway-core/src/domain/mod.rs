//! # Gateway Core - Domain Module
//!
//! Domain entities for the mock gateway.

pub mod access_token;
pub mod notification;
pub mod payment_session;

pub use access_token::IssuedToken;
pub use notification::{NotificationPayload, NotificationReceipt, ReceivedNotification};
pub use payment_session::{Amount, NewPaymentSession, PaymentOutcome, PaymentSession, PaymentStatus};
