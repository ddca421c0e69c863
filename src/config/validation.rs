//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::fmt;
use url::Url;

use crate::config::schema::ExplorerConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ExplorerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.provider.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            "provider.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "provider.base_url",
            format!("invalid URL '{}': {}", config.provider.base_url, e),
        )),
    }

    if let Some(key) = &config.provider.api_key {
        if key.trim().is_empty() {
            errors.push(ValidationError::new("provider.api_key", "must not be blank"));
        }
    }

    if config.provider.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "provider.request_timeout_secs",
            "must be greater than 0",
        ));
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::new(
            "retries.max_attempts",
            "must be at least 1",
        ));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ExplorerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ExplorerConfig::default();
        config.provider.base_url = "not a url".to_string();
        config.retries.max_attempts = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].field, "provider.base_url");
        assert_eq!(errors[1].field, "retries.max_attempts");
        assert_eq!(errors[2].field, "observability.log_level");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = ExplorerConfig::default();
        config.provider.base_url = "ftp://example.com/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_rejects_zero_timeout_and_blank_key() {
        let mut config = ExplorerConfig::default();
        config.provider.request_timeout_secs = 0;
        config.provider.api_key = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
