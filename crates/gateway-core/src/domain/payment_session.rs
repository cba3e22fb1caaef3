// ============================================================================
// Gateway Core - Payment Session Entity
// File: crates/gateway-core/src/domain/payment_session.rs
// Description: One simulated payment attempt and its state machine
// ============================================================================

use std::fmt;

use gateway_shared::constants::TRANSACTION_ID_PREFIX;
use gateway_shared::{new_id, now, SessionId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::notification::NotificationPayload;
use crate::error::DomainError;

/// Payment session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Success => "SUCCESS",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome requested by the payer on the mock page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentOutcome {
    Success,
    Failed,
    Cancelled,
}

impl PaymentOutcome {
    /// Case-insensitive. Anything unrecognised, including a missing value,
    /// resolves as `Failed`.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_uppercase()).as_deref() {
            Some("SUCCESS") => PaymentOutcome::Success,
            Some("CANCELLED") | Some("CANCELED") => PaymentOutcome::Cancelled,
            _ => PaymentOutcome::Failed,
        }
    }
}

impl From<PaymentOutcome> for PaymentStatus {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Success => PaymentStatus::Success,
            PaymentOutcome::Failed => PaymentStatus::Failed,
            PaymentOutcome::Cancelled => PaymentStatus::Cancelled,
        }
    }
}

/// Caller-supplied amount, kept as sent. JSON clients send numbers, form
/// clients send text; neither is validated. Any other JSON value is kept as
/// its text form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Number(serde_json::Number),
    Text(String),
}

impl Amount {
    pub fn is_blank(&self) -> bool {
        match self {
            Amount::Number(_) => false,
            Amount::Text(text) => text.trim().is_empty(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Amount::Number(n),
            Value::String(s) => Amount::Text(s),
            Value::Null => Amount::Text(String::new()),
            other => Amount::Text(other.to_string()),
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(t) => f.write_str(t.trim()),
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Number(value.into())
    }
}

/// Validated input for a new session.
#[derive(Debug, Clone)]
pub struct NewPaymentSession {
    pub order_id: String,
    pub amount: Amount,
    pub currency: String,
    pub customer_phone: Option<String>,
    pub notification_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

/// Payment session entity
#[derive(Debug, Clone, Serialize)]
pub struct PaymentSession {
    pub id: SessionId,
    pub order_id: String,
    pub amount: Amount,
    pub currency: String,
    pub customer_phone: Option<String>,
    pub status: PaymentStatus,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub transaction_id: Option<String>,
    pub notification_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

impl PaymentSession {
    /// Create a new pending session with a fresh identifier
    pub fn new(draft: NewPaymentSession) -> Self {
        Self {
            id: new_id(),
            order_id: draft.order_id,
            amount: draft.amount,
            currency: draft.currency,
            customer_phone: draft.customer_phone,
            status: PaymentStatus::Pending,
            created_at: now(),
            resolved_at: None,
            transaction_id: None,
            notification_url: draft.notification_url,
            success_url: draft.success_url,
            cancel_url: draft.cancel_url,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status.is_terminal()
    }

    /// Moves the session to a terminal status.
    ///
    /// A resolved session is only overwritten when `allow_overwrite` is set;
    /// otherwise `AlreadyResolved` is returned and nothing changes.
    pub fn resolve(
        &mut self,
        outcome: PaymentOutcome,
        allow_overwrite: bool,
    ) -> Result<(), DomainError> {
        if self.is_resolved() && !allow_overwrite {
            return Err(DomainError::AlreadyResolved {
                session_id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = outcome.into();
        self.resolved_at = Some(now());
        self.transaction_id = match outcome {
            PaymentOutcome::Success => Some(generate_transaction_id()),
            PaymentOutcome::Failed | PaymentOutcome::Cancelled => None,
        };
        Ok(())
    }

    /// Merchant redirect for the current outcome, if the session carries one.
    pub fn redirect_url(&self) -> Option<&str> {
        match self.status {
            PaymentStatus::Success => self.success_url.as_deref(),
            _ => self.cancel_url.as_deref(),
        }
    }

    pub fn notification_payload(&self) -> NotificationPayload {
        NotificationPayload {
            order_id: self.order_id.clone(),
            status: self.status,
            txnid: self.transaction_id.clone(),
            amount: self.amount.clone(),
            currency: self.currency.clone(),
        }
    }
}

fn generate_transaction_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", TRANSACTION_ID_PREFIX, raw[..12].to_uppercase())
}
