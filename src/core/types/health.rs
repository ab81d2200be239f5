//! Provider health record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of the most recent probe of a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Whether the last probe succeeded
    pub healthy: bool,
    /// Probe latency (or the timeout, when the probe timed out)
    pub latency: Duration,
    /// When the record was written
    pub last_checked: DateTime<Utc>,
    /// Error text of the last failed probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl Default for HealthRecord {
    /// Unprobed providers are assumed healthy until the first probe says otherwise
    fn default() -> Self {
        Self {
            healthy: true,
            latency: Duration::ZERO,
            last_checked: Utc::now(),
            last_error: None,
        }
    }
}
