//! Router configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating router configuration");

        self.policy.validate()
    }
}

impl Validate for RoutingPolicyConfig {
    fn validate(&self) -> Result<(), String> {
        match self {
            RoutingPolicyConfig::CostBased {
                cost_weight,
                latency_weight,
                health_weight,
                max_latency_ms,
            } => {
                let weights = [*cost_weight, *latency_weight, *health_weight];
                if weights.iter().any(|w| !w.is_finite()) {
                    return Err("Routing weights must be finite numbers".to_string());
                }
                if weights.iter().sum::<f64>() <= 0.0 {
                    return Err("Routing weights must sum to a positive number".to_string());
                }
                if *max_latency_ms == 0 {
                    return Err("Routing max_latency_ms must be greater than 0".to_string());
                }
                Ok(())
            }
            RoutingPolicyConfig::Failover { primary, backups, .. } => {
                if primary.trim().is_empty() {
                    return Err("Failover policy requires a primary provider".to_string());
                }
                if backups.iter().any(|b| b == primary) {
                    return Err(format!(
                        "Failover primary '{}' cannot also be a backup",
                        primary
                    ));
                }
                Ok(())
            }
        }
    }
}
