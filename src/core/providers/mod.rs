//! Provider handles and the backends behind them
//!
//! A [`ProviderHandle`] fronts one backend and carries its identity, model
//! list, price and latency tables, and the cached health record. Routing
//! policies only ever see handles; the [`ProviderBackend`] trait is the seam
//! where real API clients plug in.

pub mod backend;
pub mod error;
pub mod handle;
pub mod pricing;
pub mod registry;
pub mod static_backend;

pub use backend::ProviderBackend;
pub use error::ProviderError;
pub use handle::ProviderHandle;
pub use pricing::{LatencyProfile, PriceRule, PricingTable};
pub use registry::ProviderRegistry;
pub use static_backend::StaticBackend;

use crate::config::ProviderConfig;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Create a handle for one provider entry
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<ProviderHandle>> {
    let backend: Arc<dyn ProviderBackend> = match config.provider_type.as_str() {
        "static" => Arc::new(StaticBackend::new(&config.name, config.models.clone())),
        other => {
            return Err(GatewayError::config(format!(
                "Unsupported provider type '{}' for provider '{}'",
                other, config.name
            )));
        }
    };

    Ok(Arc::new(ProviderHandle::new(
        &config.name,
        config.models.clone(),
        PricingTable::from(&config.pricing),
        LatencyProfile::from(&config.latency),
        backend,
    )))
}

/// Build the registry from configuration, skipping disabled entries
pub fn build_registry(configs: &[ProviderConfig]) -> Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();

    for config in configs {
        if !config.enabled {
            debug!(provider = %config.name, "skipping disabled provider");
            continue;
        }
        registry.register(create_provider(config)?)?;
    }

    info!(count = registry.len(), "providers registered");
    Ok(registry)
}
