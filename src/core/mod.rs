//! Core functionality for the gateway
//!
//! - `types` - request, response and health data
//! - `providers` - provider handles, backends and the registry
//! - `router` - routing policies and the dispatcher

pub mod providers;
pub mod router;
pub mod types;
