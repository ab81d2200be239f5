//! Dispatch configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controls how the gateway executes a routed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Total execution attempts, across providers, for one request
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Timeout applied to each backend execution, in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl DispatchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_max_attempts() -> u32 {
    3
}
