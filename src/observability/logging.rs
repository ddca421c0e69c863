//! Structured logging.
//!
//! The library only emits `tracing` events. Applications that want them
//! printed call [`init_logging_from`] once, or install their own subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::schema::ObservabilityConfig;

/// Install a global fmt subscriber at the configured log level.
pub fn init_logging_from(config: &ObservabilityConfig) -> bool {
    init_logging(&config.log_level)
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `default_level` when set. Returns `false` if a
/// global subscriber was already installed.
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("txscope={}", default_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
