//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Gateway, server, provider, health and dispatch validators
//! - `router_validators`: Routing policy validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod router_validators;
mod trait_def;

pub use trait_def::Validate;
