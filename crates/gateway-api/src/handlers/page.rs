//! Browser-facing pages

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use gateway_core::DomainError;

use crate::error::ApiError;
use crate::pages::{PageRenderer, ResultPage};
use crate::state::AppState;

/// Mock payment page - GET /mock-payment/{session_id}
pub async fn mock_payment_page(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    match state.gateway.find_session(&session_id) {
        Ok(session) => Ok(Html(state.pages.mock_payment(&session)?).into_response()),
        Err(DomainError::SessionNotFound(_)) => {
            tracing::warn!("Mock payment page requested for unknown session {}", session_id);
            let html = state.pages.not_found(&session_id)?;
            Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn success_page(
    State(pages): State<Arc<PageRenderer>>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(pages.result(ResultPage::Success)?))
}

pub async fn cancel_page(
    State(pages): State<Arc<PageRenderer>>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(pages.result(ResultPage::Cancel)?))
}
