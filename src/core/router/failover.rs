//! Primary/backup routing
//!
//! The primary serves every request it can. Once the primary is marked as
//! failed, requests go to the first usable backup until the cool-down has
//! elapsed, even if the primary looks healthy again in the meantime.

use super::error::RouterError;
use super::metrics::PolicyMetrics;
use super::policy::{RoutingDecision, RoutingPolicy};
use crate::core::providers::{ProviderError, ProviderHandle, ProviderRegistry};
use crate::core::types::ChatRequest;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

pub const DEFAULT_FAILOVER_DELAY: Duration = Duration::from_secs(30);

const BACKUP_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone)]
struct FailoverState {
    primary: String,
    backups: Vec<String>,
    failover_delay: Duration,
    last_failover: Option<Instant>,
    last_failover_at: Option<DateTime<Utc>>,
}

impl FailoverState {
    fn should_use_primary(&self) -> bool {
        match self.last_failover {
            None => true,
            Some(at) => at.elapsed() > self.failover_delay,
        }
    }
}

#[derive(Debug)]
pub struct FailoverPolicy {
    state: RwLock<FailoverState>,
    metrics: PolicyMetrics,
}

fn usable<'a>(
    providers: &'a ProviderRegistry,
    name: &str,
    model: &str,
) -> Option<&'a Arc<ProviderHandle>> {
    providers
        .get(name)
        .filter(|p| p.is_healthy() && p.supports_model(model))
}

impl FailoverPolicy {
    pub fn new(primary: impl Into<String>, backups: Vec<String>) -> Self {
        Self {
            state: RwLock::new(FailoverState {
                primary: primary.into(),
                backups,
                failover_delay: DEFAULT_FAILOVER_DELAY,
                last_failover: None,
                last_failover_at: None,
            }),
            metrics: PolicyMetrics::new(),
        }
    }

    pub fn with_failover_delay(self, delay: Duration) -> Self {
        self.set_failover_delay(delay);
        self
    }

    /// True until the primary fails, and again once the cool-down has passed
    pub fn should_use_primary(&self) -> bool {
        self.state.read().should_use_primary()
    }

    /// Start the cool-down if `provider` is the primary
    pub fn mark_failover(&self, provider: &str) {
        let mut state = self.state.write();
        if provider != state.primary {
            return;
        }
        state.last_failover = Some(Instant::now());
        state.last_failover_at = Some(Utc::now());
        info!(
            primary = %provider,
            cool_down_secs = state.failover_delay.as_secs(),
            "primary provider failed, switching to backups"
        );
    }

    pub fn set_failover_delay(&self, delay: Duration) {
        self.state.write().failover_delay = delay;
    }

    pub fn failover_delay(&self) -> Duration {
        self.state.read().failover_delay
    }

    /// Replace the primary and clear any running cool-down
    pub fn set_primary_provider(&self, provider: impl Into<String>) {
        let mut state = self.state.write();
        state.primary = provider.into();
        state.last_failover = None;
        state.last_failover_at = None;
    }

    pub fn primary_provider(&self) -> String {
        self.state.read().primary.clone()
    }

    pub fn set_backup_providers(&self, backups: Vec<String>) {
        self.state.write().backups = backups;
    }

    pub fn backup_providers(&self) -> Vec<String> {
        self.state.read().backups.clone()
    }

    /// Wall-clock time of the last recorded primary failure
    pub fn last_failover(&self) -> Option<DateTime<Utc>> {
        self.state.read().last_failover_at
    }

    pub fn is_in_failover_mode(&self) -> bool {
        !self.should_use_primary()
    }
}

impl RoutingPolicy for FailoverPolicy {
    fn name(&self) -> &'static str {
        "failover"
    }

    fn description(&self) -> &'static str {
        "Routes requests to primary provider with automatic failover to backup providers"
    }

    fn decide_route(
        &self,
        request: &ChatRequest,
        providers: &ProviderRegistry,
    ) -> Result<RoutingDecision, RouterError> {
        self.validate(request)?;

        let state = self.state.read().clone();
        let model = &request.model;

        let backups: Vec<&str> = state
            .backups
            .iter()
            .filter(|name| usable(providers, name, model).is_some())
            .map(String::as_str)
            .collect();

        let decision = if state.should_use_primary()
            && usable(providers, &state.primary, model).is_some()
        {
            RoutingDecision::new(&state.primary, model, self.name())
                .with_reason("Primary provider is healthy and available")
                .with_alternatives(backups.iter().map(|s| s.to_string()).collect())
        } else if let Some((chosen, rest)) = backups.split_first() {
            RoutingDecision::new(*chosen, model, self.name())
                .with_confidence(BACKUP_CONFIDENCE)
                .with_fallback(true)
                .with_reason(format!(
                    "Using backup provider {} (primary unavailable)",
                    chosen
                ))
                .with_alternatives(rest.iter().map(|s| s.to_string()).collect())
        } else {
            return Err(RouterError::NoAvailableProvider(model.clone()));
        };

        debug!(
            provider = %decision.provider_name,
            model = %decision.model,
            fallback = decision.fallback,
            "failover route decided"
        );

        self.metrics.record_decision(&decision);
        Ok(decision)
    }

    fn record_outcome(&self, decision: &RoutingDecision, success: bool, latency: Duration) {
        if !success {
            self.mark_failover(&decision.provider_name);
        }
        self.metrics.record_outcome(decision, success, latency);
    }

    /// Errors caused by the request itself leave the primary in service
    fn record_failure(&self, decision: &RoutingDecision, error: &ProviderError, latency: Duration) {
        if error.is_request_fault() {
            debug!(
                provider = %decision.provider_name,
                error = %error,
                "request rejected by provider, cool-down not started"
            );
            self.metrics.record_outcome(decision, false, latency);
        } else {
            self.record_outcome(decision, false, latency);
        }
    }

    fn metrics(&self) -> &PolicyMetrics {
        &self.metrics
    }
}
