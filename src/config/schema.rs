//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every field has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default explorer endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/api";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Explorer endpoint and credentials.
    pub provider: ProviderConfig,

    /// Retry policy for provider requests.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Explorer provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL every query string is appended to.
    pub base_url: String,

    /// Optional API key, sent as the `apikey` query parameter.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout_secs: 30,
        }
    }
}

/// Retry configuration.
///
/// Each attempt is preceded by `pre_request_delay_ms`. A non-200 answer
/// that is not the last attempt adds `retry_delay_ms` before the next one.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,

    /// Pause before every attempt in milliseconds (rate-limit courtesy).
    pub pre_request_delay_ms: u64,

    /// Pause after a failed, non-final attempt in milliseconds.
    pub retry_delay_ms: u64,
}

impl RetryConfig {
    pub fn pre_request_delay(&self) -> Duration {
        Duration::from_millis(self.pre_request_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            pre_request_delay_ms: 300,
            retry_delay_ms: 3000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExplorerConfig::default();
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.retries.max_attempts, 3);
        assert_eq!(config.retries.pre_request_delay(), Duration::from_millis(300));
        assert_eq!(config.retries.retry_delay(), Duration::from_secs(3));
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ExplorerConfig = toml::from_str(
            r#"
            [retries]
            max_attempts = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.retries.max_attempts, 5);
        assert_eq!(config.retries.retry_delay_ms, 3000);
        assert_eq!(config.provider.request_timeout_secs, 30);
    }
}
