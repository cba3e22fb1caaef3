// ============================================================================
// Gateway Core - Gateway Service
// File: crates/gateway-core/src/services/gateway_service.rs
// ============================================================================
//! Token issuance, session creation, resolution and notification relay

use std::sync::Arc;

use gateway_shared::config::AppConfig;
use gateway_shared::constants::{CANCEL_PAGE_PATH, MOCK_PAYMENT_PATH, SUCCESS_PAGE_PATH};
use gateway_shared::utils::{mask_phone, non_blank};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{
    Amount, IssuedToken, NewPaymentSession, PaymentOutcome, PaymentSession, ReceivedNotification,
};
use crate::error::DomainError;
use crate::services::notifier::{NotificationSender, PendingNotification};
use crate::store::{SessionStore, StoreStats};

/// Behaviour knobs of the simulator, usually derived from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    pub mode: String,
    pub public_base_url: String,
    pub token_ttl_seconds: u64,
    pub allow_re_resolution: bool,
    pub default_notification_url: Option<String>,
    pub default_success_url: Option<String>,
    pub default_cancel_url: Option<String>,
    pub forward_url: Option<String>,
}

impl From<&AppConfig> for GatewayOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            mode: config.gateway.mode.clone(),
            public_base_url: config.app.base_url(),
            token_ttl_seconds: config.gateway.token_ttl_seconds,
            allow_re_resolution: config.gateway.allow_re_resolution,
            default_notification_url: non_blank(config.merchant.notification_url.clone()),
            default_success_url: non_blank(config.merchant.success_url.clone()),
            default_cancel_url: non_blank(config.merchant.cancel_url.clone()),
            forward_url: non_blank(config.merchant.forward_url.clone()),
        }
    }
}

/// Create-payment input as sent by the merchant, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatePaymentRequest {
    pub amount: Option<Amount>,
    #[serde(deserialize_with = "opaque_text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "opaque_text")]
    pub order_id: Option<String>,
    #[serde(deserialize_with = "opaque_text")]
    pub customer_phone: Option<String>,
    pub notification_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
}

/// Accepts any JSON scalar as text so that only absent or blank values fail
/// validation. `1001` and `"1001"` are the same order id.
fn opaque_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Result of a successful session creation
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub session_id: String,
    pub payment_url: String,
    pub token: IssuedToken,
}

/// Result of resolving a session
#[derive(Debug)]
pub struct Resolution {
    pub session: PaymentSession,
    pub redirect_url: String,
    /// Present when the session carries a notification URL.
    pub notification: Option<PendingNotification>,
}

/// Result of receiving an inbound notification
#[derive(Debug)]
pub struct Acknowledgement {
    pub notification: ReceivedNotification,
    /// Present when a merchant forward URL is configured.
    pub forward: Option<PendingNotification>,
}

pub struct GatewayService {
    store: Arc<SessionStore>,
    notifier: Arc<dyn NotificationSender>,
    options: GatewayOptions,
}

impl GatewayService {
    pub fn new(
        store: Arc<SessionStore>,
        notifier: Arc<dyn NotificationSender>,
        options: GatewayOptions,
    ) -> Self {
        Self {
            store,
            notifier,
            options,
        }
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// Issue a simulated access token and record it
    pub fn issue_token(&self) -> IssuedToken {
        let token = IssuedToken::generate(self.options.token_ttl_seconds);
        self.store.record_token(&token);
        token
    }

    /// Validate and store a new pending session.
    ///
    /// Required fields are checked in the order `amount`, `currency`,
    /// `order_id`; nothing is stored when one is missing.
    pub fn create_session(&self, request: CreatePaymentRequest) -> Result<CreatedSession, DomainError> {
        let amount = request
            .amount
            .filter(|a| !a.is_blank())
            .ok_or_else(|| DomainError::missing("amount"))?;
        let currency = non_blank(request.currency).ok_or_else(|| DomainError::missing("currency"))?;
        let order_id = non_blank(request.order_id).ok_or_else(|| DomainError::missing("order_id"))?;

        // Simulated OAuth handshake; the token authorizes nothing afterwards.
        let token = IssuedToken::generate(self.options.token_ttl_seconds);

        let session = PaymentSession::new(NewPaymentSession {
            order_id,
            amount,
            currency,
            customer_phone: non_blank(request.customer_phone),
            notification_url: non_blank(request.notification_url)
                .or_else(|| self.options.default_notification_url.clone()),
            success_url: non_blank(request.success_url)
                .or_else(|| self.options.default_success_url.clone()),
            cancel_url: non_blank(request.cancel_url)
                .or_else(|| self.options.default_cancel_url.clone()),
        });

        info!(
            "Created payment session {} for order {} ({} {}){}",
            session.id,
            session.order_id,
            session.amount,
            session.currency,
            session
                .customer_phone
                .as_deref()
                .map(|p| format!(", customer {}", mask_phone(p)))
                .unwrap_or_default()
        );

        let session_id = session.id.clone();
        self.store.insert_session(session, &token)?;

        Ok(CreatedSession {
            payment_url: self.payment_url(&session_id),
            session_id,
            token,
        })
    }

    pub fn find_session(&self, session_id: &str) -> Result<PaymentSession, DomainError> {
        self.store
            .get_session(session_id)
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))
    }

    /// Move a session to its terminal status and start the merchant
    /// notification, if any. Must be called from within a tokio runtime.
    pub fn resolve_session(
        &self,
        session_id: &str,
        outcome: PaymentOutcome,
    ) -> Result<Resolution, DomainError> {
        let session = self
            .store
            .resolve_session(session_id, outcome, self.options.allow_re_resolution)
            .map_err(|e| {
                warn!("Resolution of {} rejected: {}", session_id, e);
                e
            })?;

        info!(
            "Payment session {} resolved as {} (order {}, txnid {})",
            session.id,
            session.status,
            session.order_id,
            session.transaction_id.as_deref().unwrap_or("-")
        );

        let notification = match session.notification_url.clone() {
            Some(url) => {
                let payload = serde_json::to_value(session.notification_payload())
                    .map_err(|e| DomainError::Internal(e.to_string()))?;
                Some(PendingNotification::spawn(self.notifier.clone(), url, payload))
            }
            None => None,
        };

        let redirect_url = session
            .redirect_url()
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_redirect(outcome));

        Ok(Resolution {
            session,
            redirect_url,
            notification,
        })
    }

    /// Parse and acknowledge an inbound notification, relaying it to the
    /// merchant backend when one is configured.
    pub fn receive_notification(&self, body: &[u8]) -> Result<Acknowledgement, DomainError> {
        let notification = ReceivedNotification::parse(body).map_err(|e| {
            warn!("Rejected malformed payment notification: {}", e);
            e
        })?;

        info!(
            "Payment notification received: order={} status={} txnid={}",
            notification.order_id.as_deref().unwrap_or("-"),
            notification.status.as_deref().unwrap_or("-"),
            notification.txnid.as_deref().unwrap_or("-")
        );

        let forward = self.options.forward_url.clone().map(|url| {
            PendingNotification::spawn(self.notifier.clone(), url, notification.raw.clone())
        });

        Ok(Acknowledgement {
            notification,
            forward,
        })
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    pub fn payment_url(&self, session_id: &str) -> String {
        format!(
            "{}{}/{}",
            self.options.public_base_url, MOCK_PAYMENT_PATH, session_id
        )
    }

    fn fallback_redirect(&self, outcome: PaymentOutcome) -> String {
        let path = match outcome {
            PaymentOutcome::Success => SUCCESS_PAGE_PATH,
            PaymentOutcome::Failed | PaymentOutcome::Cancelled => CANCEL_PAGE_PATH,
        };
        format!("{}{}", self.options.public_base_url, path)
    }
}
