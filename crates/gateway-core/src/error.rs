//! Domain errors

use thiserror::Error;

use crate::domain::PaymentStatus;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Missing required field: {field}")]
    Validation { field: String },

    #[error("Payment session not found: {0}")]
    SessionNotFound(String),

    #[error("Payment session {session_id} already resolved as {status}")]
    AlreadyResolved {
        session_id: String,
        status: PaymentStatus,
    },

    #[error("Invalid payload: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn missing(field: &str) -> Self {
        DomainError::Validation { field: field.to_string() }
    }
}

/// Failure of an outbound merchant notification. Never fails the operation
/// that triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Notification timed out")]
    Timeout,

    #[error("Notification connection error: {0}")]
    Connection(String),

    #[error("Notification rejected with HTTP status {0}")]
    Status(u16),

    #[error("Notification task aborted: {0}")]
    Aborted(String),
}
