use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_core::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    status: &'static str,
    error: String,
    message: String,
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::Validation { .. } => ApiError::BadRequest(message),
            DomainError::SessionNotFound(_) => ApiError::NotFound(message),
            DomainError::AlreadyResolved { .. } => ApiError::Conflict(message),
            DomainError::Parse(_) => ApiError::ParseError(message),
            DomainError::Internal(_) => ApiError::InternalError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            },
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            },
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "Conflict", msg)
            },
            // Malformed notification bodies answer 500, as the real gateway does.
            ApiError::ParseError(msg) => {
                tracing::error!("Parse error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "ParseError", msg)
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            },
        };

        let body = Json(ErrorResponse {
            success: false,
            status: "error",
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
