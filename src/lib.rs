//! # routewise
//!
//! A routing gateway in front of interchangeable LLM providers.
//!
//! ## Features
//!
//! - **Routing policies**: cost-based selection and primary/backup failover,
//!   swappable at runtime
//! - **Health monitoring**: periodic concurrent probes with per-provider
//!   uptime and latency tracking
//! - **Dispatch**: re-routes to another provider after retryable failures
//! - **HTTP surface**: OpenAI-style chat completions plus admin endpoints
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use routewise::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Routing without the server
//!
//! ```rust
//! use routewise::core::providers::build_registry;
//! use routewise::core::router::{CostBasedPolicy, RoutingPolicy};
//! use routewise::core::types::{ChatRequest, user_message};
//! use routewise::config::ProviderConfig;
//!
//! let openai = ProviderConfig::new("openai", vec!["gpt-4".into()]).with_flat_price(0.03);
//! let registry = build_registry(&[openai]).unwrap();
//! let request = ChatRequest::new("gpt-4", vec![user_message("hi")]);
//! let decision = CostBasedPolicy::new().decide_route(&request, &registry).unwrap();
//! assert_eq!(decision.provider_name, "openai");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod utils;

pub use config::Config;
pub use utils::error::{GatewayError, Result};

use crate::core::providers::{ProviderRegistry, build_registry};
use crate::core::router::{Dispatcher, build_policy};
use crate::monitoring::{HealthMonitor, HealthMonitorConfig};
use crate::server::{AppState, HttpServer};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fully wired gateway: providers, policy, health monitor and HTTP server
pub struct Gateway {
    state: AppState,
}

impl Gateway {
    /// Build every component from configuration. Nothing runs until [`Gateway::run`].
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let providers = Arc::new(build_registry(config.providers())?);
        let policy = build_policy(&config.router().policy)?;
        info!(policy = policy.name(), "routing policy selected");

        let monitor = HealthMonitor::new(HealthMonitorConfig::from(config.health_check()));
        for provider in providers.iter() {
            monitor.add_provider(Arc::clone(provider));
        }

        let dispatcher = Dispatcher::from_config(config.dispatch());
        let state = AppState::new(config, providers, policy, monitor, dispatcher);

        Ok(Self { state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.state.providers
    }

    pub fn monitor(&self) -> &HealthMonitor {
        &self.state.monitor
    }

    /// Serve until the process is signalled to stop
    pub async fn run(self) -> Result<()> {
        self.run_until(CancellationToken::new()).await
    }

    /// Serve until `shutdown` is cancelled or the process is signalled
    ///
    /// The monitor is stopped and providers are closed even when the server
    /// fails.
    pub async fn run_until(self, shutdown: CancellationToken) -> Result<()> {
        info!("Starting routewise gateway");

        let monitor = self.state.monitor.clone();
        let providers = Arc::clone(&self.state.providers);

        if self.state.config.health_check().enabled {
            monitor.start();
        } else {
            info!("health monitoring disabled");
        }

        let result = HttpServer::new(self.state).serve(shutdown).await;

        monitor.stop().await;
        providers.close_all().await;
        info!("Gateway shutdown completed");

        result
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
