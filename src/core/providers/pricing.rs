//! Cost and latency estimation tables
//!
//! Both estimates are pure functions of the model id and a token count, so
//! policies can call them on every decision without touching the backend.

use super::error::ProviderError;
use crate::config::{LatencyConfig, PricingConfig};
use std::time::Duration;

/// A single substring price rule
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRule {
    pub pattern: String,
    pub cost_per_1k_tokens: f64,
}

/// Ordered price rules plus an optional fallback price
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    rules: Vec<PriceRule>,
    default_cost_per_1k_tokens: Option<f64>,
}

impl PricingTable {
    pub fn new(rules: Vec<PriceRule>, default_cost_per_1k_tokens: Option<f64>) -> Self {
        Self {
            rules,
            default_cost_per_1k_tokens,
        }
    }

    /// Flat price for every model
    pub fn flat(cost_per_1k_tokens: f64) -> Self {
        Self::new(Vec::new(), Some(cost_per_1k_tokens))
    }

    /// Price per 1k tokens for `model`, first matching rule wins
    pub fn price_for(&self, model: &str) -> Option<f64> {
        self.rules
            .iter()
            .find(|rule| model.contains(&rule.pattern))
            .map(|rule| rule.cost_per_1k_tokens)
            .or(self.default_cost_per_1k_tokens)
    }

    /// Estimated cost of `tokens` tokens on `model`
    pub fn estimate(&self, provider: &str, model: &str, tokens: u64) -> Result<f64, ProviderError> {
        let price = self
            .price_for(model)
            .ok_or_else(|| ProviderError::cost_unavailable(provider, model))?;
        Ok(tokens as f64 * price / 1000.0)
    }
}

impl From<&PricingConfig> for PricingTable {
    fn from(config: &PricingConfig) -> Self {
        let rules = config
            .rules
            .iter()
            .map(|rule| PriceRule {
                pattern: rule.pattern.clone(),
                cost_per_1k_tokens: rule.cost_per_1k_tokens,
            })
            .collect();
        Self::new(rules, config.default_cost_per_1k_tokens)
    }
}

/// Linear latency model: `base + tokens * per_token`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyProfile {
    pub base: Duration,
    pub per_token: Duration,
}

impl LatencyProfile {
    pub fn new(base: Duration, per_token: Duration) -> Self {
        Self { base, per_token }
    }

    pub fn estimate(&self, tokens: u64) -> Duration {
        let tokens = u32::try_from(tokens).unwrap_or(u32::MAX);
        self.base.saturating_add(self.per_token.saturating_mul(tokens))
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        (&LatencyConfig::default()).into()
    }
}

impl From<&LatencyConfig> for LatencyProfile {
    fn from(config: &LatencyConfig) -> Self {
        Self::new(config.base(), config.per_token())
    }
}
