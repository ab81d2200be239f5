//! Provider handle
//!
//! One handle per configured backend. Everything except the health record is
//! fixed at construction; the health record is written by the health monitor
//! and read by routing policies.

use super::backend::ProviderBackend;
use super::error::ProviderError;
use super::pricing::{LatencyProfile, PricingTable};
use crate::core::types::{ChatRequest, ChatResponse, HealthRecord};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct ProviderHandle {
    name: String,
    models: Vec<String>,
    pricing: PricingTable,
    latency: LatencyProfile,
    health: RwLock<HealthRecord>,
    backend: Arc<dyn ProviderBackend>,
    closed: AtomicBool,
}

impl ProviderHandle {
    pub fn new(
        name: impl Into<String>,
        models: Vec<String>,
        pricing: PricingTable,
        latency: LatencyProfile,
        backend: Arc<dyn ProviderBackend>,
    ) -> Self {
        Self {
            name: name.into(),
            models,
            pricing,
            latency,
            health: RwLock::new(HealthRecord::default()),
            backend,
            closed: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Supported models in configured order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn supports_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn is_healthy(&self) -> bool {
        self.health.read().healthy
    }

    /// Copy of the latest health record
    pub fn health(&self) -> HealthRecord {
        self.health.read().clone()
    }

    /// Overwrite the health record and stamp the current time
    pub fn set_health(&self, healthy: bool, latency: Duration, error: Option<String>) {
        let mut record = self.health.write();
        *record = HealthRecord {
            healthy,
            latency,
            last_checked: Utc::now(),
            last_error: error,
        };
    }

    pub fn estimate_cost(&self, request: &ChatRequest) -> Result<f64, ProviderError> {
        if !self.supports_model(&request.model) {
            return Err(ProviderError::cost_unavailable(&self.name, &request.model));
        }
        self.pricing
            .estimate(&self.name, &request.model, request.estimated_tokens())
    }

    pub fn estimate_latency(&self, request: &ChatRequest) -> Result<Duration, ProviderError> {
        if !self.supports_model(&request.model) {
            return Err(ProviderError::latency_unavailable(&self.name, &request.model));
        }
        Ok(self.latency.estimate(request.estimated_tokens()))
    }

    /// Liveness probe. Does not touch the health record.
    pub async fn probe(&self) -> Result<Vec<String>, ProviderError> {
        if self.is_closed() {
            return Err(ProviderError::provider_unavailable(&self.name, "provider closed"));
        }
        self.backend.list_models().await
    }

    pub async fn execute(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        if self.is_closed() {
            return Err(ProviderError::provider_unavailable(&self.name, "provider closed"));
        }
        self.backend.execute(request).await
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Tear down the backend. Only the first call reaches it.
    pub async fn close(&self) -> Result<(), ProviderError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        debug!(provider = %self.name, "closing provider");
        self.backend.close().await
    }
}
