use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use gateway_core::GatewayService;

use crate::response::{HealthResponse, StatusResponse};

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Status handler - GET /status
pub async fn status(State(gateway): State<Arc<GatewayService>>) -> Json<StatusResponse> {
    let stats = gateway.stats();
    Json(StatusResponse {
        status: "running",
        mode: gateway.options().mode.clone(),
        payments_count: stats.payments_count,
        tokens_count: stats.tokens_count,
    })
}
