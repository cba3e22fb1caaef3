//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_NOTIFY_TIMEOUT_SECONDS, DEFAULT_TOKEN_TTL_SECONDS, MODE_DEVELOPMENT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub merchant: MerchantSettings,
    pub notifier: NotifierSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Externally reachable origin used to build payment and redirect URLs.
    /// Falls back to `http://{host}:{port}`.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl AppSettings {
    pub fn base_url(&self) -> String {
        match self.public_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            env: "development".into(),
            host: "127.0.0.1".into(),
            port: 5000,
            name: "mock-gateway".into(),
            public_base_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    pub mode: String,
    pub token_ttl_seconds: u64,
    /// Lets a resolved session be resolved again, overwriting its outcome.
    pub allow_re_resolution: bool,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            mode: MODE_DEVELOPMENT.into(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            allow_re_resolution: false,
        }
    }
}

/// Merchant-side defaults applied to sessions whose create request omits them.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MerchantSettings {
    pub notification_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    /// Merchant backend that receives relayed `/payment-notification` payloads.
    pub forward_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotifierSettings {
    pub timeout_seconds: u64,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_NOTIFY_TIMEOUT_SECONDS }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl AppConfig {
    /// Layers built-in defaults, `{dir}/default`, `{dir}/{APP_ENV}` and
    /// environment variables, in that order. Variables are named
    /// `GATEWAY_<SECTION>__<KEY>`, e.g. `GATEWAY_MERCHANT__NOTIFICATION_URL`.
    pub fn load_from(dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("app.env", defaults.app.env)?
            .set_default("app.host", defaults.app.host)?
            .set_default("app.port", i64::from(defaults.app.port))?
            .set_default("app.name", defaults.app.name)?
            .set_default("gateway.mode", defaults.gateway.mode)?
            .set_default("gateway.token_ttl_seconds", defaults.gateway.token_ttl_seconds as i64)?
            .set_default("gateway.allow_re_resolution", defaults.gateway.allow_re_resolution)?
            .set_default("notifier.timeout_seconds", defaults.notifier.timeout_seconds as i64)?
            .set_default("log.level", defaults.log.level)?
            .set_default("log.format", defaults.log.format)?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
