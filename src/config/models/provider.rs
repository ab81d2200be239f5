//! Provider configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique provider name, used by routing policies
    pub name: String,
    /// Backend kind
    #[serde(default = "default_provider_type")]
    pub provider_type: String,
    /// Supported model identifiers, in preference order
    #[serde(default)]
    pub models: Vec<String>,
    /// Price table used for cost estimates
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Latency profile used for latency estimates
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Whether provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            provider_type: default_provider_type(),
            models: Vec::new(),
            pricing: PricingConfig::default(),
            latency: LatencyConfig::default(),
            timeout: default_timeout(),
            enabled: true,
        }
    }
}

impl ProviderConfig {
    /// Enabled `static` provider serving `models`
    pub fn new(name: impl Into<String>, models: Vec<String>) -> Self {
        Self {
            name: name.into(),
            models,
            ..Default::default()
        }
    }

    /// Same price for every model
    pub fn with_flat_price(mut self, cost_per_1k_tokens: f64) -> Self {
        self.pricing = PricingConfig {
            rules: Vec::new(),
            default_cost_per_1k_tokens: Some(cost_per_1k_tokens),
        };
        self
    }
}

/// One price rule: applies to every model whose id contains `pattern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRuleConfig {
    pub pattern: String,
    pub cost_per_1k_tokens: f64,
}

/// Price table configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Rules are tried in order; the first match wins
    #[serde(default)]
    pub rules: Vec<PriceRuleConfig>,
    /// Price for supported models no rule matches
    #[serde(default)]
    pub default_cost_per_1k_tokens: Option<f64>,
}

/// Latency profile configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Fixed overhead per request, in milliseconds
    #[serde(default = "default_base_latency_ms")]
    pub base_ms: u64,
    /// Added per estimated token, in milliseconds
    #[serde(default = "default_per_token_latency_ms")]
    pub per_token_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            base_ms: default_base_latency_ms(),
            per_token_ms: default_per_token_latency_ms(),
        }
    }
}

impl LatencyConfig {
    pub fn base(&self) -> Duration {
        Duration::from_millis(self.base_ms)
    }

    pub fn per_token(&self) -> Duration {
        Duration::from_millis(self.per_token_ms)
    }
}

fn default_provider_type() -> String {
    "static".to_string()
}

fn default_base_latency_ms() -> u64 {
    200
}

fn default_per_token_latency_ms() -> u64 {
    10
}
