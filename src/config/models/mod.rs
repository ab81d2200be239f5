//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod dispatch;
pub mod gateway;
pub mod health;
pub mod logging;
pub mod provider;
pub mod router;
pub mod server;

// Re-export all configuration types
pub use dispatch::*;
pub use gateway::*;
pub use health::*;
pub use logging::*;
pub use provider::*;
pub use router::*;
pub use server::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default backend request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}
