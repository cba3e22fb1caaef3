//! HTTP module (reqwest adapters)

mod client;
pub mod notifier;

pub use notifier::HttpNotificationSender;
