//! Policy construction from configuration

use super::cost_based::CostBasedPolicy;
use super::error::RouterError;
use super::failover::{DEFAULT_FAILOVER_DELAY, FailoverPolicy};
use super::policy::RoutingPolicy;
use crate::config::RoutingPolicyConfig;
use std::sync::Arc;
use std::time::Duration;

/// Names accepted by [`policy_config_for_name`]
pub const POLICY_NAMES: [&str; 2] = ["cost_based", "failover"];

pub fn build_policy(config: &RoutingPolicyConfig) -> Result<Arc<dyn RoutingPolicy>, RouterError> {
    match config {
        RoutingPolicyConfig::CostBased {
            cost_weight,
            latency_weight,
            health_weight,
            max_latency_ms,
        } => Ok(Arc::new(CostBasedPolicy::with_settings(
            *cost_weight,
            *latency_weight,
            *health_weight,
            Duration::from_millis(*max_latency_ms),
        )?)),
        RoutingPolicyConfig::Failover {
            primary,
            backups,
            failover_delay_secs,
        } => Ok(Arc::new(
            FailoverPolicy::new(primary.clone(), backups.clone())
                .with_failover_delay(Duration::from_secs(*failover_delay_secs)),
        )),
    }
}

/// Default configuration for a policy chosen by name
///
/// `failover` takes the first provider as primary and the rest, in order, as
/// backups.
pub fn policy_config_for_name(
    name: &str,
    providers: &[String],
) -> Result<RoutingPolicyConfig, RouterError> {
    match name {
        "cost_based" => Ok(RoutingPolicyConfig::default()),
        "failover" => {
            let (primary, backups) = providers
                .split_first()
                .ok_or_else(|| {
                    RouterError::InvalidRequest(
                        "failover policy needs at least one provider".to_string(),
                    )
                })?;
            Ok(RoutingPolicyConfig::Failover {
                primary: primary.clone(),
                backups: backups.to_vec(),
                failover_delay_secs: DEFAULT_FAILOVER_DELAY.as_secs(),
            })
        }
        other => Err(RouterError::UnknownPolicy(other.to_string())),
    }
}
