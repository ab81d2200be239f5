//! Backend trait
//!
//! A backend performs the actual calls behind a [`ProviderHandle`](super::ProviderHandle).
//! Pricing, latency and health live on the handle, so backends only need to
//! answer two questions: what models do you serve, and can you run this
//! request.

use super::error::ProviderError;
use crate::core::types::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use std::fmt::Debug;

#[async_trait]
pub trait ProviderBackend: Send + Sync + Debug {
    /// Models currently served. Used as the liveness probe.
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Run a chat completion
    async fn execute(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;

    /// Release backend resources. Must tolerate repeated calls.
    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
