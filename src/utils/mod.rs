//! Utility modules for the gateway
//!
//! - **error**: gateway error type and HTTP mapping
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;
