//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::parse(&content)?;
        config.gateway.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config = Self::parse(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides; used when no config file exists
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = GatewayConfig::default();
        gateway.apply_env_overrides()?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { gateway })
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get providers configuration
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.gateway.providers
    }

    /// Get router settings
    pub fn router(&self) -> &RouterConfig {
        &self.gateway.router
    }

    /// Get health monitor settings
    pub fn health_check(&self) -> &HealthCheckConfig {
        &self.gateway.health_check
    }

    /// Get dispatch settings
    pub fn dispatch(&self) -> &DispatchConfig {
        &self.gateway.dispatch
    }

    /// Get logging settings
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway.validate().map_err(GatewayError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
