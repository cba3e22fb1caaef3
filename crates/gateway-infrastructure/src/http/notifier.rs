//! reqwest-backed merchant notifier

use std::time::Duration;

use async_trait::async_trait;
use gateway_core::{NotificationError, NotificationReceipt, NotificationSender};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::http::client::create_client;

/// POSTs notifications as JSON. A single attempt bounded by the client
/// timeout; non-2xx answers are reported as errors.
#[derive(Clone)]
pub struct HttpNotificationSender {
    client: Client,
}

impl HttpNotificationSender {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: create_client(timeout)?,
        })
    }
}

#[async_trait]
impl NotificationSender for HttpNotificationSender {
    async fn send(&self, url: &str, payload: &Value) -> Result<NotificationReceipt, NotificationError> {
        debug!("POST {} {}", url, payload);

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Status(status.as_u16()));
        }

        Ok(NotificationReceipt {
            status_code: status.as_u16(),
        })
    }
}

fn classify(e: reqwest::Error) -> NotificationError {
    if e.is_timeout() {
        NotificationError::Timeout
    } else {
        NotificationError::Connection(e.to_string())
    }
}
