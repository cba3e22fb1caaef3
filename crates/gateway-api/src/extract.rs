//! Body extractor accepting either JSON or urlencoded forms

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// How the caller encoded the body. Decides between a JSON answer and a
/// browser redirect on `/create-payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
}

/// Deserializes `application/x-www-form-urlencoded` bodies as forms and
/// everything else as JSON. A body without a content type is read as JSON,
/// and an empty one as `{}`.
///
/// ```rust,ignore
/// async fn handler(JsonOrForm { kind, value }: JsonOrForm<MyRequest>) { /* ... */ }
/// ```
#[derive(Debug)]
pub struct JsonOrForm<T> {
    pub kind: BodyKind,
    pub value: T,
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let Some(content_type) = content_type else {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            let raw: &[u8] = if body.is_empty() { b"{}" } else { &body };
            let value = serde_json::from_slice(raw)
                .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;
            return Ok(Self { kind: BodyKind::Json, value });
        };

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self { kind: BodyKind::Form, value })
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Ok(Self { kind: BodyKind::Json, value })
        }
    }
}
