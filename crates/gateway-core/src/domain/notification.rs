//! Notification payloads, outbound and inbound

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::payment_session::{Amount, PaymentStatus};
use crate::error::DomainError;

/// Body POSTed to the merchant's notification URL once a session resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub order_id: String,
    pub status: PaymentStatus,
    pub txnid: Option<String>,
    pub amount: Amount,
    pub currency: String,
}

/// Delivery acknowledgement from the merchant endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationReceipt {
    pub status_code: u16,
}

/// Inbound notification. Only structural parseability is enforced; the known
/// fields are picked out when present.
#[derive(Debug, Clone)]
pub struct ReceivedNotification {
    pub order_id: Option<String>,
    pub status: Option<String>,
    pub txnid: Option<String>,
    pub raw: Value,
}

impl ReceivedNotification {
    pub fn parse(body: &[u8]) -> Result<Self, DomainError> {
        let raw: Value =
            serde_json::from_slice(body).map_err(|e| DomainError::Parse(e.to_string()))?;

        Ok(Self {
            order_id: field(&raw, "order_id"),
            status: field(&raw, "status"),
            txnid: field(&raw, "txnid"),
            raw,
        })
    }
}

fn field(raw: &Value, name: &str) -> Option<String> {
    match raw.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        let received = ReceivedNotification::parse(
            br#"{"order_id":"SO001","status":"SUCCESS","txnid":"MP1234"}"#,
        )
        .unwrap();
        assert_eq!(received.order_id.as_deref(), Some("SO001"));
        assert_eq!(received.status.as_deref(), Some("SUCCESS"));
        assert_eq!(received.txnid.as_deref(), Some("MP1234"));
    }

    #[test]
    fn test_parse_accepts_any_json() {
        let received = ReceivedNotification::parse(b"[1, 2, 3]").unwrap();
        assert!(received.order_id.is_none());

        let received = ReceivedNotification::parse(br#"{"order_id": 42, "status": null}"#).unwrap();
        assert_eq!(received.order_id.as_deref(), Some("42"));
        assert!(received.status.is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let err = ReceivedNotification::parse(b"order_id=SO001").unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }

    #[test]
    fn test_payload_serializes_null_txnid() {
        let payload = NotificationPayload {
            order_id: "SO002".into(),
            status: PaymentStatus::Cancelled,
            txnid: None,
            amount: Amount::Text("1200".into()),
            currency: "MGA".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "CANCELLED");
        assert!(json["txnid"].is_null());
        assert_eq!(json["amount"], "1200");
    }
}
