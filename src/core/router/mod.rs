//! Routing decision engine
//!
//! ## Module Structure
//!
//! - `policy` - `RoutingPolicy` trait, `RoutingDecision` and shared filtering
//! - `cost_based` - lowest composite cost/latency score wins
//! - `failover` - primary provider with ordered backups and a cool-down
//! - `metrics` - best-effort per-policy counters
//! - `builder` - policy construction from configuration
//! - `dispatch` - decide, execute, report, and re-route on retryable failures
//! - `error` - routing errors

pub mod builder;
pub mod cost_based;
pub mod dispatch;
pub mod error;
pub mod failover;
pub mod metrics;
pub mod policy;


pub use builder::{POLICY_NAMES, build_policy, policy_config_for_name};
pub use cost_based::{CostBasedPolicy, DEFAULT_MAX_LATENCY, ScoreWeights};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::RouterError;
pub use failover::{DEFAULT_FAILOVER_DELAY, FailoverPolicy};
pub use metrics::{PolicyMetrics, PolicyMetricsSnapshot};
pub use policy::{RoutingDecision, RoutingPolicy, eligible_candidates, validate_request};
