//! Provider registry
//!
//! Ordered, name-unique set of provider handles. Registration order is the
//! order policies see candidates in, which makes ties deterministic.

use super::handle::ProviderHandle;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<ProviderHandle>>,
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider. Names must be unique.
    pub fn register(&mut self, provider: Arc<ProviderHandle>) -> Result<()> {
        let name = provider.name().to_string();
        if self.index.contains_key(&name) {
            return Err(GatewayError::DuplicateProvider(name));
        }
        self.index.insert(name, self.providers.len());
        self.providers.push(provider);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ProviderHandle>> {
        self.index.get(name).map(|&i| &self.providers[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Provider names in registration order
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProviderHandle>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Copy of this registry without the named providers
    ///
    /// Handles are shared, so health written through the original is visible
    /// through the view.
    pub fn excluding<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let mut view = Self::new();
        for provider in &self.providers {
            if names.iter().any(|n| n.as_ref() == provider.name()) {
                continue;
            }
            view.index
                .insert(provider.name().to_string(), view.providers.len());
            view.providers.push(Arc::clone(provider));
        }
        view
    }

    /// Close every provider, logging failures
    pub async fn close_all(&self) {
        for provider in &self.providers {
            if let Err(e) = provider.close().await {
                warn!(provider = %provider.name(), error = %e, "failed to close provider");
            }
        }
    }
}

impl FromIterator<Arc<ProviderHandle>> for ProviderRegistry {
    /// Later duplicates are dropped with a warning
    fn from_iter<I: IntoIterator<Item = Arc<ProviderHandle>>>(iter: I) -> Self {
        let mut registry = Self::new();
        for provider in iter {
            let name = provider.name().to_string();
            if let Err(e) = registry.register(provider) {
                warn!(provider = %name, error = %e, "duplicate provider dropped");
            }
        }
        registry
    }
}
