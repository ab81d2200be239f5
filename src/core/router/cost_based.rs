//! Cost-based routing
//!
//! Scores every eligible provider as
//! `cost * cost_weight + latency_secs * latency_weight` and picks the lowest.
//! Only healthy providers are scored, so the health weight contributes no
//! penalty; it is kept so weight updates can be renormalized as a triple.

use super::error::RouterError;
use super::metrics::PolicyMetrics;
use super::policy::{RoutingDecision, RoutingPolicy, eligible_candidates};
use crate::core::providers::ProviderRegistry;
use crate::core::types::ChatRequest;
use parking_lot::RwLock;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_MAX_LATENCY: Duration = Duration::from_secs(5);

/// Best scores below this are treated as zero when computing confidence
const SCORE_EPSILON: f64 = 1e-12;

/// Scoring weights, always normalized to sum to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub cost: f64,
    pub latency: f64,
    pub health: f64,
}

impl ScoreWeights {
    /// Normalize a raw triple. Rejects non-finite values and sums `<= 0`.
    pub fn normalized(cost: f64, latency: f64, health: f64) -> Result<Self, RouterError> {
        let total = cost + latency + health;
        if !total.is_finite() || total <= 0.0 {
            return Err(RouterError::InvalidWeights(format!(
                "weights must sum to a positive number, got {}",
                total
            )));
        }
        Ok(Self {
            cost: cost / total,
            latency: latency / total,
            health: health / total,
        })
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cost: 0.6,
            latency: 0.3,
            health: 0.1,
        }
    }
}

#[derive(Debug, Clone)]
struct Settings {
    weights: ScoreWeights,
    max_latency: Duration,
}

#[derive(Debug)]
struct ScoredCandidate {
    name: String,
    score: f64,
    cost: f64,
    latency: Duration,
}

#[derive(Debug)]
pub struct CostBasedPolicy {
    settings: RwLock<Settings>,
    metrics: PolicyMetrics,
}

impl Default for CostBasedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CostBasedPolicy {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(Settings {
                weights: ScoreWeights::default(),
                max_latency: DEFAULT_MAX_LATENCY,
            }),
            metrics: PolicyMetrics::new(),
        }
    }

    /// Build with explicit weights and latency ceiling
    pub fn with_settings(
        cost: f64,
        latency: f64,
        health: f64,
        max_latency: Duration,
    ) -> Result<Self, RouterError> {
        let policy = Self::new();
        policy.set_weights(cost, latency, health)?;
        policy.set_max_latency_threshold(max_latency);
        Ok(policy)
    }

    /// Replace the weights, renormalizing them to sum to 1
    pub fn set_weights(&self, cost: f64, latency: f64, health: f64) -> Result<(), RouterError> {
        let weights = ScoreWeights::normalized(cost, latency, health)?;
        self.settings.write().weights = weights;
        Ok(())
    }

    pub fn weights(&self) -> ScoreWeights {
        self.settings.read().weights
    }

    pub fn set_max_latency_threshold(&self, threshold: Duration) {
        self.settings.write().max_latency = threshold;
    }

    pub fn max_latency_threshold(&self) -> Duration {
        self.settings.read().max_latency
    }

    fn score(
        &self,
        request: &ChatRequest,
        providers: &ProviderRegistry,
    ) -> Vec<ScoredCandidate> {
        let Settings {
            weights,
            max_latency,
        } = self.settings.read().clone();

        let mut scored = Vec::new();
        for provider in eligible_candidates(request, providers) {
            let cost = match provider.estimate_cost(request) {
                Ok(cost) => cost,
                Err(e) => {
                    debug!(provider = %provider.name(), error = %e, "skipping provider without cost estimate");
                    continue;
                }
            };
            let latency = provider.estimate_latency(request).unwrap_or(max_latency);
            if latency > max_latency {
                debug!(
                    provider = %provider.name(),
                    latency_ms = latency.as_millis() as u64,
                    "skipping provider above latency ceiling"
                );
                continue;
            }

            let score = cost * weights.cost + latency.as_secs_f64() * weights.latency;
            scored.push(ScoredCandidate {
                name: provider.name().to_string(),
                score,
                cost,
                latency,
            });
        }

        // Stable sort keeps registry order among equal scores
        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored
    }
}

/// Confidence grows from 0.8 toward 1.0 as the runner-up falls behind
fn confidence(best: f64, runner_up: Option<f64>) -> f64 {
    match runner_up {
        None => 1.0,
        Some(_) if best.abs() < SCORE_EPSILON => 1.0,
        Some(second) => (0.8 + 0.2 * (second - best) / best).min(1.0),
    }
}

impl RoutingPolicy for CostBasedPolicy {
    fn name(&self) -> &'static str {
        "cost_based"
    }

    fn description(&self) -> &'static str {
        "Routes requests to the most cost-effective provider while considering latency and health"
    }

    fn decide_route(
        &self,
        request: &ChatRequest,
        providers: &ProviderRegistry,
    ) -> Result<RoutingDecision, RouterError> {
        self.validate(request)?;

        let scored = self.score(request, providers);
        let Some(best) = scored.first() else {
            return Err(RouterError::NoSuitableProvider(request.model.clone()));
        };

        let decision = RoutingDecision::new(&best.name, &request.model, self.name())
            .with_confidence(confidence(best.score, scored.get(1).map(|c| c.score)))
            .with_reason(format!(
                "Cost: ${:.4}, Latency: {:?}, Health: Good",
                best.cost, best.latency
            ))
            .with_estimates(Some(best.cost), Some(best.latency))
            .with_alternatives(scored[1..].iter().map(|c| c.name.clone()).collect());

        debug!(
            provider = %decision.provider_name,
            model = %decision.model,
            score = best.score,
            confidence = decision.confidence,
            candidates = scored.len(),
            "cost-based route decided"
        );

        self.metrics.record_decision(&decision);
        Ok(decision)
    }

    fn metrics(&self) -> &PolicyMetrics {
        &self.metrics
    }
}
