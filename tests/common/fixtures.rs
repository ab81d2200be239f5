//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use super::backends::MockBackend;
use routewise::core::providers::{LatencyProfile, PricingTable, ProviderHandle, ProviderRegistry};
use routewise::core::types::{ChatRequest, system_message, user_message};
use std::sync::Arc;
use std::time::Duration;

/// Factory for creating chat requests
pub struct ChatRequestFactory;

impl ChatRequestFactory {
    /// One user message; estimates charge it 100 tokens
    pub fn simple(model: &str) -> ChatRequest {
        ChatRequest::new(model, vec![user_message("Hello, how are you?")])
    }

    /// System prompt plus user message
    pub fn with_system(model: &str) -> ChatRequest {
        ChatRequest::new(
            model,
            vec![
                system_message("You are a helpful assistant."),
                user_message("What is the capital of France?"),
            ],
        )
    }

    /// Request with no messages, rejected by every policy
    pub fn empty(model: &str) -> ChatRequest {
        ChatRequest::new(model, Vec::new())
    }
}

/// Factory for provider handles backed by [`MockBackend`]
pub struct ProviderFactory;

impl ProviderFactory {
    /// Handle whose estimates for a [`ChatRequestFactory::simple`] request are
    /// exactly `cost` and `latency_ms`
    pub fn fixed(
        name: &str,
        models: &[&str],
        cost: f64,
        latency_ms: u64,
    ) -> (Arc<ProviderHandle>, Arc<MockBackend>) {
        let backend = Arc::new(MockBackend::new(name, models));
        let handle = Self::with_backend(name, models, cost, latency_ms, Arc::clone(&backend));
        (handle, backend)
    }

    pub fn with_backend(
        name: &str,
        models: &[&str],
        cost: f64,
        latency_ms: u64,
        backend: Arc<MockBackend>,
    ) -> Arc<ProviderHandle> {
        Arc::new(ProviderHandle::new(
            name,
            models.iter().map(|m| m.to_string()).collect(),
            // 100 estimated tokens, so the per-1k price is ten times the cost
            PricingTable::flat(cost * 10.0),
            LatencyProfile::new(Duration::from_millis(latency_ms), Duration::ZERO),
            backend,
        ))
    }

    pub fn registry(handles: &[Arc<ProviderHandle>]) -> ProviderRegistry {
        handles.iter().cloned().collect()
    }
}

/// Two-provider gateway configuration using the built-in static backend
pub const GATEWAY_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 18080
providers:
  - name: openai
    models: ["gpt-4", "gpt-3.5-turbo"]
    pricing:
      rules:
        - pattern: "gpt-4"
          cost_per_1k_tokens: 0.1
        - pattern: "gpt-3.5"
          cost_per_1k_tokens: 0.002
    latency:
      base_ms: 200
      per_token_ms: 0
  - name: azure
    models: ["gpt-4"]
    pricing:
      default_cost_per_1k_tokens: 0.3
    latency:
      base_ms: 100
      per_token_ms: 0
router:
  policy:
    type: cost_based
health_check:
  interval_secs: 30
  timeout_ms: 500
dispatch:
  max_attempts: 2
"#;
