//! Health monitor types and data structures

use crate::config::HealthCheckConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Smoothing factor for the average probe latency
pub const LATENCY_SMOOTHING: f64 = 0.1;

/// Monitor timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthMonitorConfig {
    /// Time between probe cycles
    pub interval: Duration,
    /// Upper bound for a single probe
    pub probe_timeout: Duration,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        (&HealthCheckConfig::default()).into()
    }
}

impl From<&HealthCheckConfig> for HealthMonitorConfig {
    fn from(config: &HealthCheckConfig) -> Self {
        Self {
            interval: config.interval(),
            probe_timeout: config.timeout(),
        }
    }
}

/// Rolling probe statistics for one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderMetrics {
    pub total_checks: u64,
    pub successful_checks: u64,
    pub failed_checks: u64,
    pub last_check: Option<DateTime<Utc>>,
    pub last_latency: Duration,
    /// Exponential moving average over successful probes
    pub average_latency: Duration,
    /// successful / total * 100
    pub uptime: f64,
}

impl ProviderMetrics {
    pub fn record_success(&mut self, latency: Duration) {
        self.total_checks += 1;
        self.successful_checks += 1;
        self.average_latency = if self.successful_checks == 1 {
            latency
        } else {
            self.average_latency.mul_f64(1.0 - LATENCY_SMOOTHING)
                + latency.mul_f64(LATENCY_SMOOTHING)
        };
        self.finish(latency);
    }

    pub fn record_failure(&mut self, latency: Duration) {
        self.total_checks += 1;
        self.failed_checks += 1;
        self.finish(latency);
    }

    fn finish(&mut self, latency: Duration) {
        self.last_latency = latency;
        self.last_check = Some(Utc::now());
        self.uptime = self.successful_checks as f64 / self.total_checks as f64 * 100.0;
    }
}

/// Summary of one probe cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub probed: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}
