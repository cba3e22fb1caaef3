//! Domain services (simulator logic)

pub mod gateway_service;
pub mod notifier;

pub use gateway_service::{
    Acknowledgement, CreatePaymentRequest, CreatedSession, GatewayOptions, GatewayService,
    Resolution,
};
pub use notifier::{NotificationSender, PendingNotification};
