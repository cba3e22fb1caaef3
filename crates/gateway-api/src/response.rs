//! Response bodies

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    pub payment_url: String,
    pub pay_token: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProcessPaymentRequest {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessPaymentResponse {
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationAck {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub mode: String,
    pub payments_count: usize,
    pub tokens_count: usize,
}

/// OAuth-style token answer, mirroring the real provider
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
