//! Configuration-only backend
//!
//! Serves the model list from configuration and never talks to a remote API.
//! Request execution reports `NotImplemented`.

use super::backend::ProviderBackend;
use super::error::ProviderError;
use crate::core::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct StaticBackend {
    provider: String,
    models: Vec<String>,
}

impl StaticBackend {
    pub fn new(provider: impl Into<String>, models: Vec<String>) -> Self {
        Self {
            provider: provider.into(),
            models,
        }
    }
}

#[async_trait]
impl ProviderBackend for StaticBackend {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.models.clone())
    }

    async fn execute(&self, _request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        Err(ProviderError::not_implemented(
            &self.provider,
            "chat completion",
        ))
    }
}
