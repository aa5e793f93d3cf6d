use std::fmt;
use std::time::Duration;

use url::Url;

use crate::constants::{BASE_URL, DEFAULT_TIMEOUT};
use crate::error::XRocketError;
use crate::security::REDACTED;

pub const ENV_API_TOKEN: &str = "XROCKET_API_TOKEN";
pub const ENV_BASE_URL: &str = "XROCKET_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "XROCKET_TIMEOUT_SECS";

/// Explicit client configuration. Nothing is read from globals once built.
#[derive(Clone)]
pub struct ClientConfig {
    /// App API token: sent as `Rocket-Pay-Key` and used to derive the
    /// webhook signing key.
    pub token: String,
    /// API root, e.g. `https://pay.ton-rocket.com/`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &REDACTED)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Production endpoint and default timeout.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        validate_url(&base_url)?;
        self.base_url = base_url;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        // Required: API token
        let token = var(ENV_API_TOKEN).ok_or(ConfigError::MissingRequired(ENV_API_TOKEN))?;

        let mut config = Self::new(token);

        if let Some(base_url) = var(ENV_BASE_URL) {
            config = config.with_base_url(base_url)?;
        }

        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidTimeout(raw));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if !config.base_url.starts_with("https://") {
            tracing::warn!(
                base_url = %config.base_url,
                "xRocket base URL does not use HTTPS; the API token will be sent in cleartext"
            );
        }

        Ok(config)
    }
}

fn validate_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl(raw.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::InvalidUrl(raw.to_string())),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

impl From<ConfigError> for XRocketError {
    fn from(e: ConfigError) -> Self {
        XRocketError::Config(e.to_string())
    }
}
