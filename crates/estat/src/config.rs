//! Runtime configuration for the e-Stat client.

use std::time::Duration;

use crate::error::{EstatError, Result};

/// Base URL of the e-Stat REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.e-stat.go.jp";

/// Upstream request timeout. Large tables take a while to assemble
/// server-side.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for [`EstatClient`](crate::EstatClient).
///
/// Environment-derived defaults are resolved once at startup and threaded
/// into the client explicitly; nothing reads the environment per request.
#[derive(Debug, Clone)]
pub struct EstatConfig {
    /// Application ID sent as `appId` with every request.
    pub api_key: String,
    /// Base URL of the API (overridable for tests).
    pub base_url: String,
    /// Default `limit` injected into requests that do not set one.
    pub default_limit: Option<u32>,
}

impl EstatConfig {
    /// Create a configuration with the given application ID.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_limit: None,
        }
    }

    /// Resolve configuration from the environment.
    ///
    /// `ESTAT_API_KEY` is mandatory; its absence is a startup-time fatal
    /// condition, not a per-request error. `RESPONSE_SIZE` optionally caps
    /// the number of rows returned per request.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ESTAT_API_KEY").map_err(|_| {
            EstatError::Config("ESTAT_API_KEY environment variable not set".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(value) = std::env::var("RESPONSE_SIZE") {
            let limit = value.trim().parse::<u32>().map_err(|_| {
                EstatError::Config(format!("RESPONSE_SIZE is not a number: {value}"))
            })?;
            config.default_limit = Some(limit);
        }
        Ok(config)
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the default row limit.
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = Some(limit);
        self
    }
}
