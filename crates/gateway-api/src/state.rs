use std::sync::Arc;

use axum::extract::FromRef;
use gateway_core::{GatewayOptions, GatewayService, NotificationSender, SessionStore};
use gateway_shared::{config::AppConfig, AppError};

use crate::pages::PageRenderer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    /// Fresh, empty store wired to the given notifier.
    pub fn new(config: &AppConfig, notifier: Arc<dyn NotificationSender>) -> Result<Self, AppError> {
        let store = Arc::new(SessionStore::new());
        let gateway = Arc::new(GatewayService::new(
            store,
            notifier,
            GatewayOptions::from(config),
        ));

        Ok(Self {
            gateway,
            pages: Arc::new(PageRenderer::new()?),
        })
    }
}

impl FromRef<AppState> for Arc<GatewayService> {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl FromRef<AppState> for Arc<PageRenderer> {
    fn from_ref(state: &AppState) -> Self {
        state.pages.clone()
    }
}
