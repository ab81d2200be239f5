//! Provider health monitor
//!
//! Probes every registered provider concurrently, writes the outcome into the
//! provider's health record and keeps rolling metrics per provider. It is the
//! only writer of provider health.

use super::types::{CycleSummary, HealthMonitorConfig, ProviderMetrics};
use crate::core::providers::ProviderHandle;
use crate::core::types::HealthRecord;
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::sync::futures::Notified;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
struct RunningTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
struct MonitorInner {
    config: RwLock<HealthMonitorConfig>,
    providers: RwLock<HashMap<String, Arc<ProviderHandle>>>,
    /// Single lock for the whole metrics table
    metrics: RwLock<HashMap<String, ProviderMetrics>>,
    /// Held for the duration of a cycle so cycles never overlap
    cycle_gate: tokio::sync::Mutex<()>,
    trigger: Notify,
    /// Wakes the loop to rebuild its ticker after an interval change
    reconfigured: Notify,
    task: Mutex<Option<RunningTask>>,
}

/// Cheap to clone; clones share state
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    inner: Arc<MonitorInner>,
}

impl HealthMonitor {
    pub fn new(config: HealthMonitorConfig) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config: RwLock::new(config),
                providers: RwLock::new(HashMap::new()),
                metrics: RwLock::new(HashMap::new()),
                cycle_gate: tokio::sync::Mutex::new(()),
                trigger: Notify::new(),
                reconfigured: Notify::new(),
                task: Mutex::new(None),
            }),
        }
    }

    /// Start monitoring `provider`, replacing any provider with the same name
    pub fn add_provider(&self, provider: Arc<ProviderHandle>) {
        let name = provider.name().to_string();
        self.inner.providers.write().insert(name.clone(), provider);
        self.inner
            .metrics
            .write()
            .insert(name.clone(), ProviderMetrics::default());
        debug!(provider = %name, "provider added to health monitor");
    }

    /// Stop monitoring `name`. Returns whether it was registered.
    pub fn remove_provider(&self, name: &str) -> bool {
        let removed = self.inner.providers.write().remove(name).is_some();
        self.inner.metrics.write().remove(name);
        removed
    }

    pub fn provider_count(&self) -> usize {
        self.inner.providers.read().len()
    }

    /// Spawn the probe loop. No-op while already running.
    pub fn start(&self) {
        let mut task = self.inner.task.lock();
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            debug!("health monitor already running");
            return;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(self.clone().run_loop(cancel.clone()));
        *task = Some(RunningTask { cancel, handle });
    }

    /// Stop the loop and wait for any in-flight cycle to finish
    pub async fn stop(&self) {
        let running = self.inner.task.lock().take();
        if let Some(RunningTask { cancel, handle }) = running {
            cancel.cancel();
            if let Err(e) = handle.await {
                error!("health monitor task failed: {}", e);
            }
        }
        // A forced cycle may still be running outside the loop
        let _drained = self.inner.cycle_gate.lock().await;
    }

    pub fn is_running(&self) -> bool {
        self.inner
            .task
            .lock()
            .as_ref()
            .is_some_and(|t| !t.handle.is_finished())
    }

    /// Run one cycle now and wait for it
    pub async fn force_check(&self) -> CycleSummary {
        info!("forcing health check for all providers");
        self.run_cycle().await
    }

    /// Ask the running loop for an immediate cycle without waiting for it.
    /// Ignored while the loop is stopped.
    pub fn trigger(&self) {
        if !self.is_running() {
            debug!("health monitor not running, trigger ignored");
            return;
        }
        self.inner.trigger.notify_one();
    }

    pub(super) fn notified(&self) -> Notified<'_> {
        self.inner.trigger.notified()
    }

    pub(super) fn reconfigured(&self) -> Notified<'_> {
        self.inner.reconfigured.notified()
    }

    pub fn get_health(&self, name: &str) -> Result<HealthRecord> {
        self.inner
            .providers
            .read()
            .get(name)
            .map(|p| p.health())
            .ok_or_else(|| GatewayError::ProviderNotFound(name.to_string()))
    }

    pub fn get_all_health(&self) -> HashMap<String, HealthRecord> {
        self.inner
            .providers
            .read()
            .iter()
            .map(|(name, p)| (name.clone(), p.health()))
            .collect()
    }

    pub fn get_metrics(&self, name: &str) -> Result<ProviderMetrics> {
        self.inner
            .metrics
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| GatewayError::ProviderNotFound(name.to_string()))
    }

    pub fn get_all_metrics(&self) -> HashMap<String, ProviderMetrics> {
        self.inner.metrics.read().clone()
    }

    pub fn check_interval(&self) -> Duration {
        self.inner.config.read().interval
    }

    /// A running loop picks up the new interval immediately; the next cycle
    /// is one full interval from now
    pub fn set_check_interval(&self, interval: Duration) {
        self.inner.config.write().interval = interval;
        info!(interval_ms = interval.as_millis() as u64, "health check interval updated");
        if self.is_running() {
            self.inner.reconfigured.notify_one();
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        self.inner.config.read().probe_timeout
    }

    /// Probe every provider once, concurrently
    pub(super) async fn run_cycle(&self) -> CycleSummary {
        let _gate = self.inner.cycle_gate.lock().await;

        let providers: Vec<Arc<ProviderHandle>> =
            self.inner.providers.read().values().cloned().collect();
        let probe_timeout = self.probe_timeout();
        let started_at = Utc::now();
        let started = Instant::now();

        let results = join_all(
            providers
                .iter()
                .map(|provider| self.check_provider(provider, probe_timeout)),
        )
        .await;

        let healthy = results.iter().filter(|ok| **ok).count();
        let summary = CycleSummary {
            probed: results.len(),
            healthy,
            unhealthy: results.len() - healthy,
            started_at,
            duration: started.elapsed(),
        };

        debug!(
            probed = summary.probed,
            healthy = summary.healthy,
            unhealthy = summary.unhealthy,
            duration_ms = summary.duration.as_millis() as u64,
            "health check cycle finished"
        );
        summary
    }

    /// Probe one provider and record the outcome. Returns whether it was healthy.
    async fn check_provider(&self, provider: &ProviderHandle, probe_timeout: Duration) -> bool {
        let name = provider.name();
        let started = Instant::now();

        let (latency, failure) = match tokio::time::timeout(probe_timeout, provider.probe()).await
        {
            Ok(Ok(_)) => (started.elapsed(), None),
            Ok(Err(e)) => (started.elapsed(), Some(e.to_string())),
            Err(_) => (
                probe_timeout,
                Some(format!("health check timed out after {:?}", probe_timeout)),
            ),
        };

        let healthy = failure.is_none();
        match &failure {
            None => debug!(provider = %name, latency_ms = latency.as_millis() as u64, "provider health check successful"),
            Some(e) => warn!(provider = %name, latency_ms = latency.as_millis() as u64, error = %e, "provider health check failed"),
        }

        provider.set_health(healthy, latency, failure);

        // Providers removed mid-cycle keep no metrics
        if let Some(metrics) = self.inner.metrics.write().get_mut(name) {
            if healthy {
                metrics.record_success(latency);
            } else {
                metrics.record_failure(latency);
            }
        }

        healthy
    }
}
