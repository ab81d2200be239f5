//! Routing policy configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    /// Active routing policy
    #[serde(default)]
    pub policy: RoutingPolicyConfig,
}

/// Routing policy selection and its parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingPolicyConfig {
    /// Cheapest acceptable provider by composite score
    CostBased {
        #[serde(default = "default_cost_weight")]
        cost_weight: f64,
        #[serde(default = "default_latency_weight")]
        latency_weight: f64,
        #[serde(default = "default_health_weight")]
        health_weight: f64,
        /// Providers estimated slower than this are never chosen
        #[serde(default = "default_max_latency_ms")]
        max_latency_ms: u64,
    },
    /// Primary provider with ordered backups
    Failover {
        primary: String,
        #[serde(default)]
        backups: Vec<String>,
        /// Seconds to stay on backups after the primary fails
        #[serde(default = "default_failover_delay")]
        failover_delay_secs: u64,
    },
}

impl Default for RoutingPolicyConfig {
    fn default() -> Self {
        Self::CostBased {
            cost_weight: default_cost_weight(),
            latency_weight: default_latency_weight(),
            health_weight: default_health_weight(),
            max_latency_ms: default_max_latency_ms(),
        }
    }
}

impl RoutingPolicyConfig {
    /// Policy name as reported by the policy itself
    pub fn name(&self) -> &'static str {
        match self {
            Self::CostBased { .. } => "cost_based",
            Self::Failover { .. } => "failover",
        }
    }

    pub fn failover_delay(&self) -> Option<Duration> {
        match self {
            Self::Failover {
                failover_delay_secs,
                ..
            } => Some(Duration::from_secs(*failover_delay_secs)),
            Self::CostBased { .. } => None,
        }
    }
}

fn default_cost_weight() -> f64 {
    0.6
}

fn default_latency_weight() -> f64 {
    0.3
}

fn default_health_weight() -> f64 {
    0.1
}

fn default_max_latency_ms() -> u64 {
    5_000
}

fn default_failover_delay() -> u64 {
    30
}
