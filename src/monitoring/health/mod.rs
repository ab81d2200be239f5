//! Provider health monitoring
//!
//! A background loop probes every provider on a fixed interval (and on
//! demand), updating each provider's health record and rolling metrics.

mod monitor;
mod tasks;
mod types;


// Re-export public types
pub use monitor::HealthMonitor;
pub use types::{CycleSummary, HealthMonitorConfig, LATENCY_SMOOTHING, ProviderMetrics};
