//! Health check configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider health monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    /// Seconds between probe cycles
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    /// Upper bound for a single probe, in milliseconds
    #[serde(default = "default_probe_timeout")]
    pub timeout_ms: u64,
    /// Run the background monitor at all
    #[serde(default = "super::default_true")]
    pub enabled: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            timeout_ms: default_probe_timeout(),
            enabled: true,
        }
    }
}

impl HealthCheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_interval() -> u64 {
    30
}

fn default_probe_timeout() -> u64 {
    10_000
}
