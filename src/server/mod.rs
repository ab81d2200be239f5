//! HTTP server implementation
//!
//! Thin actix-web layer over the router, dispatcher and health monitor.

pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
