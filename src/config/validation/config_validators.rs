//! Core configuration validators
//!
//! Validation implementations for the main gateway configuration structures.

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

/// Backend kinds the gateway knows how to build
pub(crate) const SUPPORTED_PROVIDER_TYPES: &[&str] = &["static"];

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;

        let mut provider_names = HashSet::new();
        for provider in &self.providers {
            if !provider_names.insert(provider.name.as_str()) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
            provider.validate()?;
        }

        self.router.validate()?;
        if let RoutingPolicyConfig::Failover { primary, backups, .. } = &self.router.policy {
            let enabled: HashSet<&str> = self
                .providers
                .iter()
                .filter(|p| p.enabled)
                .map(|p| p.name.as_str())
                .collect();
            if !enabled.is_empty() && !enabled.contains(primary.as_str()) {
                return Err(format!(
                    "Failover primary '{}' is not a configured provider",
                    primary
                ));
            }
            if let Some(unknown) = backups
                .iter()
                .find(|b| !enabled.is_empty() && !enabled.contains(b.as_str()))
            {
                return Err(format!(
                    "Failover backup '{}' is not a configured provider",
                    unknown
                ));
            }
        }

        self.health_check.validate()?;
        self.dispatch.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if !SUPPORTED_PROVIDER_TYPES.contains(&self.provider_type.as_str()) {
            return Err(format!(
                "Unsupported provider type '{}' for provider {}",
                self.provider_type, self.name
            ));
        }

        if self.enabled && self.models.is_empty() {
            return Err(format!(
                "Provider {} must list at least one model",
                self.name
            ));
        }

        if self.timeout == 0 {
            return Err(format!(
                "Provider {} timeout must be greater than 0",
                self.name
            ));
        }

        for rule in &self.pricing.rules {
            if rule.pattern.is_empty() {
                return Err(format!("Provider {} has a price rule with an empty pattern", self.name));
            }
            if !rule.cost_per_1k_tokens.is_finite() || rule.cost_per_1k_tokens < 0.0 {
                return Err(format!(
                    "Provider {} price for '{}' must be a non-negative number",
                    self.name, rule.pattern
                ));
            }
        }

        if let Some(default) = self.pricing.default_cost_per_1k_tokens {
            if !default.is_finite() || default < 0.0 {
                return Err(format!(
                    "Provider {} default price must be a non-negative number",
                    self.name
                ));
            }
        }

        Ok(())
    }
}

impl Validate for HealthCheckConfig {
    fn validate(&self) -> Result<(), String> {
        if self.interval_secs == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("Health check timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for DispatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Dispatch max_attempts must be at least 1".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Dispatch request timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
