//! Application-wide constants

pub const MODE_DEVELOPMENT: &str = "development";
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_NOTIFY_TIMEOUT_SECONDS: u64 = 5;
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
pub const TRANSACTION_ID_PREFIX: &str = "MP";
pub const SUCCESS_PAGE_PATH: &str = "/payment-success";
pub const CANCEL_PAGE_PATH: &str = "/payment-cancel";
pub const MOCK_PAYMENT_PATH: &str = "/mock-payment";
