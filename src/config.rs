use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::errors::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Connection settings for the discussions API.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    #[validate(url)]
    pub api_url: String,

    /// Bearer token sent with every request. Never serialized or printed.
    #[serde(default, skip_serializing)]
    #[validate(length(min = 1))]
    pub token: Option<String>,

    /// Transport-level timeout; none by default
    pub timeout_ms: Option<u64>,

    /// Directory for the rolling log file, stdout only when unset
    pub log_dir: Option<PathBuf>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_ms", &self.timeout_ms)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_ms: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load from `APP_API_URL`, `APP_API_TOKEN`, `APP_API_TIMEOUT_MS` and
    /// `APP_LOG_DIR`, reading a `.env` file first when present.
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as `from_env` but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("APP_API_URL").unwrap_or_else(|| {
            debug!("APP_API_URL not set, using {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });

        let timeout_ms = lookup("APP_API_TIMEOUT_MS")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|e| {
                    ClientError::Config(format!("APP_API_TIMEOUT_MS must be an integer: {}", e))
                })
            })
            .transpose()?;

        let config = Self {
            api_url,
            token: lookup("APP_API_TOKEN").filter(|t| !t.is_empty()),
            timeout_ms,
            log_dir: lookup("APP_LOG_DIR").map(PathBuf::from),
        };

        config.checked()
    }

    /// Validate and return self.
    pub fn checked(self) -> Result<Self, ClientError> {
        self.validate()
            .map_err(|e| ClientError::Config(e.to_string()))?;
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
