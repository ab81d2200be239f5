//! Per-policy bookkeeping
//!
//! Counters here are informational. Nothing in the routing path reads them.

use super::policy::RoutingDecision;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Point-in-time copy of a policy's counters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyMetricsSnapshot {
    /// Decisions produced
    pub total_decisions: u64,
    /// Outcomes reported as successful
    pub successful_requests: u64,
    /// Outcomes reported as failed
    pub failed_requests: u64,
    /// Decisions per provider
    pub provider_selections: HashMap<String, u64>,
    /// Most recent decision
    pub last_decision: Option<RoutingDecision>,
    /// Whether the most recent reported outcome succeeded
    pub last_success: Option<bool>,
    /// Latency of the most recent reported outcome
    pub last_latency: Option<Duration>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct PolicyMetrics {
    inner: RwLock<PolicyMetricsSnapshot>,
}

impl PolicyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a decision
    pub fn record_decision(&self, decision: &RoutingDecision) {
        let mut metrics = self.inner.write();
        metrics.total_decisions += 1;
        *metrics
            .provider_selections
            .entry(decision.provider_name.clone())
            .or_insert(0) += 1;
        metrics.last_decision = Some(decision.clone());
        metrics.updated_at = Some(Utc::now());
    }

    /// Count the outcome of executing a decision
    pub fn record_outcome(&self, decision: &RoutingDecision, success: bool, latency: Duration) {
        let mut metrics = self.inner.write();
        if success {
            metrics.successful_requests += 1;
        } else {
            metrics.failed_requests += 1;
        }
        metrics.last_decision = Some(decision.clone());
        metrics.last_success = Some(success);
        metrics.last_latency = Some(latency);
        metrics.updated_at = Some(Utc::now());
    }

    pub fn snapshot(&self) -> PolicyMetricsSnapshot {
        self.inner.read().clone()
    }
}
