//! Routing policy contract
//!
//! A policy turns a request plus the current provider set into a
//! [`RoutingDecision`]. Decisions read cached health and local estimates only;
//! they never wait on a backend.

use super::error::RouterError;
use super::metrics::PolicyMetrics;
use crate::core::providers::{ProviderError, ProviderHandle, ProviderRegistry};
use crate::core::types::ChatRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Result of a routing decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Chosen provider
    pub provider_name: String,
    /// Resolved model
    pub model: String,
    /// Self-reported certainty in [0, 1]
    pub confidence: f64,
    /// Human-readable explanation
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_latency: Option<Duration>,
    /// True when a non-primary or non-best candidate was chosen
    pub fallback: bool,
    /// Other candidates that qualified, best first
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Name of the policy that decided
    pub policy: String,
    pub decided_at: DateTime<Utc>,
}

impl RoutingDecision {
    pub fn new(
        provider_name: impl Into<String>,
        model: impl Into<String>,
        policy: &str,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            model: model.into(),
            confidence: 1.0,
            reason: String::new(),
            estimated_cost: None,
            estimated_latency: None,
            fallback: false,
            alternatives: Vec::new(),
            policy: policy.to_string(),
            decided_at: Utc::now(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_estimates(mut self, cost: Option<f64>, latency: Option<Duration>) -> Self {
        self.estimated_cost = cost;
        self.estimated_latency = latency;
        self
    }

    pub fn with_fallback(mut self, fallback: bool) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }
}

/// Request checks shared by every policy
pub fn validate_request(request: &ChatRequest) -> Result<(), RouterError> {
    if request.model.trim().is_empty() {
        return Err(RouterError::InvalidRequest("model is required".to_string()));
    }
    if request.messages.is_empty() {
        return Err(RouterError::InvalidRequest(
            "at least one message is required".to_string(),
        ));
    }
    Ok(())
}

/// Providers that are healthy and serve the requested model, in registry order
pub fn eligible_candidates<'a>(
    request: &ChatRequest,
    providers: &'a ProviderRegistry,
) -> Vec<&'a Arc<ProviderHandle>> {
    providers
        .iter()
        .filter(|p| p.is_healthy() && p.supports_model(&request.model))
        .collect()
}

/// A provider selection strategy
///
/// Implementations supply `decide_route`; validation and outcome bookkeeping
/// have shared defaults.
pub trait RoutingPolicy: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn validate(&self, request: &ChatRequest) -> Result<(), RouterError> {
        validate_request(request)
    }

    /// Pick a provider for `request`
    fn decide_route(
        &self,
        request: &ChatRequest,
        providers: &ProviderRegistry,
    ) -> Result<RoutingDecision, RouterError>;

    /// Report how executing `decision` went
    fn record_outcome(&self, decision: &RoutingDecision, success: bool, latency: Duration) {
        self.metrics().record_outcome(decision, success, latency);
    }

    /// Report a failed execution of `decision` together with its cause
    fn record_failure(&self, decision: &RoutingDecision, _error: &ProviderError, latency: Duration) {
        self.record_outcome(decision, false, latency);
    }

    fn metrics(&self) -> &PolicyMetrics;
}
