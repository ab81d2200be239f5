//! Application state shared across HTTP handlers

use crate::config::{Config, RoutingPolicyConfig, Validate};
use crate::core::providers::ProviderRegistry;
use crate::core::router::{Dispatcher, RoutingPolicy, build_policy};
use crate::monitoring::HealthMonitor;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Cloned into every actix worker; all fields are shared.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Registered providers
    pub providers: Arc<ProviderRegistry>,
    /// Active routing policy, swappable at runtime
    policy: Arc<RwLock<Arc<dyn RoutingPolicy>>>,
    pub monitor: HealthMonitor,
    pub dispatcher: Arc<Dispatcher>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: Config,
        providers: Arc<ProviderRegistry>,
        policy: Arc<dyn RoutingPolicy>,
        monitor: HealthMonitor,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config: Arc::new(config),
            providers,
            policy: Arc::new(RwLock::new(policy)),
            monitor,
            dispatcher: Arc::new(dispatcher),
            started_at: Utc::now(),
        }
    }

    /// Current policy. In-flight requests keep the policy they started with.
    pub fn policy(&self) -> Arc<dyn RoutingPolicy> {
        Arc::clone(&self.policy.read())
    }

    /// Replace the active policy
    pub fn set_policy(&self, config: &RoutingPolicyConfig) -> Result<Arc<dyn RoutingPolicy>> {
        config.validate().map_err(GatewayError::Validation)?;
        if let RoutingPolicyConfig::Failover { primary, backups, .. } = config {
            if let Some(unknown) = std::iter::once(primary)
                .chain(backups)
                .find(|name| !self.providers.contains(name))
            {
                return Err(GatewayError::ProviderNotFound(unknown.clone()));
            }
        }

        let policy = build_policy(config)?;
        *self.policy.write() = Arc::clone(&policy);
        info!(policy = policy.name(), "routing policy replaced");
        Ok(policy)
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
