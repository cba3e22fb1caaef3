use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use gateway_core::GatewayService;

use crate::error::ApiError;
use crate::response::NotificationAck;

/// Notification handler - POST /payment-notification
///
/// Takes the raw body so that a malformed payload maps to the gateway's own
/// error answer instead of the JSON extractor's rejection.
pub async fn payment_notification(
    State(gateway): State<Arc<GatewayService>>,
    body: Bytes,
) -> Result<Json<NotificationAck>, ApiError> {
    let ack = gateway.receive_notification(&body)?;

    if let Some(forward) = ack.forward {
        forward.detach();
    }

    Ok(Json(NotificationAck { status: "received" }))
}
