//! Connection settings for the remote service.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BASE_URL_VAR: &str = "TODOLIST_BASE_URL";
const API_KEY_VAR: &str = "TODOLIST_API_KEY";
const TIMEOUT_VAR: &str = "TODOLIST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent as the `API-KEY` header on every request when set.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Read `TODOLIST_BASE_URL`, `TODOLIST_API_KEY` and
    /// `TODOLIST_TIMEOUT_SECS`, falling back to defaults for unset values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout {
                    name: TIMEOUT_VAR,
                    value,
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            api_key: lookup(API_KEY_VAR).filter(|k| !k.is_empty()),
            timeout,
        })
    }
}
