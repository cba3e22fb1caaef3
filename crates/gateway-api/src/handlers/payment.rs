// ============================================================================
// Gateway API - Payment Handlers
// File: crates/gateway-api/src/handlers/payment.rs
// ============================================================================
//! Session creation, resolution and lookup

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use gateway_core::services::CreatePaymentRequest;
use gateway_core::{GatewayService, PaymentOutcome, PaymentSession};

use crate::error::ApiError;
use crate::extract::{BodyKind, JsonOrForm};
use crate::response::{CreatePaymentResponse, ProcessPaymentRequest, ProcessPaymentResponse};

/// Create payment handler - POST /create-payment
///
/// JSON callers get the session details back; form posts from a browser are
/// redirected straight to the mock payment page.
pub async fn create_payment(
    State(gateway): State<Arc<GatewayService>>,
    JsonOrForm { kind, value }: JsonOrForm<CreatePaymentRequest>,
) -> Result<Response, ApiError> {
    let created = gateway.create_session(value)?;

    let response = match kind {
        BodyKind::Json => Json(CreatePaymentResponse {
            success: true,
            payment_url: created.payment_url,
            pay_token: created.session_id,
        })
        .into_response(),
        BodyKind::Form => Redirect::to(&created.payment_url).into_response(),
    };

    Ok(response)
}

/// Process payment handler - POST /process-mock-payment/{session_id}
pub async fn process_mock_payment(
    State(gateway): State<Arc<GatewayService>>,
    Path(session_id): Path<String>,
    JsonOrForm { value, .. }: JsonOrForm<ProcessPaymentRequest>,
) -> Result<Json<ProcessPaymentResponse>, ApiError> {
    let outcome = PaymentOutcome::parse(value.status.as_deref());
    let resolution = gateway.resolve_session(&session_id, outcome)?;

    // The payer's redirect never waits on the merchant callback.
    if let Some(notification) = resolution.notification {
        notification.detach();
    }

    Ok(Json(ProcessPaymentResponse {
        redirect_url: resolution.redirect_url,
    }))
}

/// Session lookup handler - GET /api/payments/{session_id}
pub async fn get_payment(
    State(gateway): State<Arc<GatewayService>>,
    Path(session_id): Path<String>,
) -> Result<Json<PaymentSession>, ApiError> {
    Ok(Json(gateway.find_session(&session_id)?))
}
