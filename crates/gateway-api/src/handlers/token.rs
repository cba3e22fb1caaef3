use std::sync::Arc;

use axum::{extract::State, Json};
use gateway_core::GatewayService;
use gateway_shared::constants::TOKEN_TYPE_BEARER;
use tracing::info;

use crate::response::TokenResponse;

/// Token handler - POST /token
///
/// Credentials are neither required nor checked.
pub async fn issue_token(State(gateway): State<Arc<GatewayService>>) -> Json<TokenResponse> {
    let token = gateway.issue_token();
    info!("Issued access token valid for {}s", token.ttl_seconds);

    Json(TokenResponse {
        access_token: token.token,
        token_type: TOKEN_TYPE_BEARER,
        expires_in: token.ttl_seconds,
    })
}
