//! Monitoring
//!
//! Currently only provider health monitoring, which feeds the router.

pub mod health;

pub use health::{HealthMonitor, HealthMonitorConfig, ProviderMetrics};
