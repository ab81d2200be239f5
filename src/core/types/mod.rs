//! Core type definition module
//!
//! Request, response and health types shared by providers, policies and the
//! health monitor.

pub mod chat;
pub mod health;
pub mod message;
pub mod responses;

// Re-export all public types
pub use chat::*;
pub use health::*;
pub use message::*;
pub use responses::*;
