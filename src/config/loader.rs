//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ExplorerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ExplorerConfig, ConfigError> {
    let config: ExplorerConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ExplorerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    tracing::debug!(
        path = %path.display(),
        base_url = %config.provider.base_url,
        max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [provider]
            base_url = "https://api-sepolia.etherscan.io/api"
            api_key = "KEY"

            [retries]
            retry_delay_ms = 50
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.provider.base_url, "https://api-sepolia.etherscan.io/api");
        assert_eq!(config.provider.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.retries.retry_delay_ms, 50);
        assert_eq!(config.retries.max_attempts, 3);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/txscope.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_syntax_error() {
        let result = parse_config("[retries\nmax_attempts = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_error_display() {
        let err = parse_config("[retries]\nmax_attempts = 0").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: retries.max_attempts: must be at least 1"
        );
    }
}
