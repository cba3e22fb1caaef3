//! Common types

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub type SessionId = String;
pub type Timestamp = DateTime<Utc>;

/// Fresh opaque identifier, rendered as a hyphenated UUID v4.
pub fn new_id() -> SessionId {
    Uuid::new_v4().to_string()
}

pub fn now() -> Timestamp {
    Utc::now()
}
