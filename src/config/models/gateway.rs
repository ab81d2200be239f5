//! Main gateway configuration

use super::*;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ROUTEWISE_";

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider configurations
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Router configuration
    #[serde(default)]
    pub router: RouterConfig,
    /// Health monitor configuration
    #[serde(default)]
    pub health_check: HealthCheckConfig,
    /// Dispatch configuration
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Apply `ROUTEWISE_*` environment overrides on top of this configuration
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from an arbitrary lookup (keys are given without prefix)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            debug!("Overriding server host from environment");
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| GatewayError::config(format!("Invalid SERVER_PORT '{}': {}", port, e)))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(interval) = lookup("HEALTH_CHECK_INTERVAL_SECS") {
            self.health_check.interval_secs = interval.parse().map_err(|e| {
                GatewayError::config(format!(
                    "Invalid HEALTH_CHECK_INTERVAL_SECS '{}': {}",
                    interval, e
                ))
            })?;
        }
        Ok(())
    }
}
