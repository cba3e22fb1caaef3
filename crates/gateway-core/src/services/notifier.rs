//! Outbound notification seam and the task handle returned to callers

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::NotificationReceipt;
use crate::error::NotificationError;

/// Delivers a JSON notification to a merchant URL. One attempt, no retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, url: &str, payload: &Value) -> Result<NotificationReceipt, NotificationError>;
}

/// A notification running in its own task. Await it with [`wait`] or let it
/// finish on its own with [`detach`]; either way the outcome is logged.
///
/// [`wait`]: PendingNotification::wait
/// [`detach`]: PendingNotification::detach
#[derive(Debug)]
pub struct PendingNotification {
    url: String,
    handle: JoinHandle<Result<NotificationReceipt, NotificationError>>,
}

impl PendingNotification {
    /// Must be called from within a tokio runtime.
    pub fn spawn(sender: Arc<dyn NotificationSender>, url: String, payload: Value) -> Self {
        let target = url.clone();
        let handle = tokio::spawn(async move {
            let result = sender.send(&target, &payload).await;
            match &result {
                Ok(receipt) => info!(
                    "Notification delivered to {} (HTTP {})",
                    target, receipt.status_code
                ),
                Err(e) => warn!("Notification to {} failed: {}", target, e),
            }
            result
        });

        Self { url, handle }
    }

    pub async fn wait(self) -> Result<NotificationReceipt, NotificationError> {
        self.handle
            .await
            .map_err(|e| NotificationError::Aborted(e.to_string()))?
    }

    pub fn detach(self) {
        debug!("Notification to {} running detached", self.url);
    }
}
