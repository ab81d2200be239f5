//! Logging setup
//!
//! Installs the global `tracing` subscriber from the logging section of the
//! gateway configuration. `RUST_LOG`, when set, takes precedence over the
//! configured level.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Build the env filter for the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Initialize the global tracing subscriber
///
/// Fails if a global subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config);

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_current_span(false)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_thread_ids(false)
            .try_init(),
    };

    installed.map_err(|e| GatewayError::config(format!("Failed to initialize logging: {}", e)))
}
