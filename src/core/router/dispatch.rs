//! Dispatch: decide, execute, report
//!
//! The dispatcher owns retry. On a retryable execution error it asks the
//! policy again with the failed provider removed from the candidate set, up
//! to `max_attempts` executions in total.

use super::policy::{RoutingDecision, RoutingPolicy};
use crate::config::DispatchConfig;
use crate::core::providers::{ProviderError, ProviderRegistry};
use crate::core::types::{ChatRequest, ChatResponse};
use crate::utils::error::{GatewayError, Result};
use std::borrow::Cow;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Successful dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub response: ChatResponse,
    /// Decision that produced the response
    pub decision: RoutingDecision,
    /// Executions performed, including the successful one
    pub attempts: u32,
    /// Wall time across all attempts
    pub latency: Duration,
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    max_attempts: u32,
    request_timeout: Duration,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_config(&DispatchConfig::default())
    }
}

impl Dispatcher {
    pub fn new(max_attempts: u32, request_timeout: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            request_timeout,
        }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.max_attempts, config.request_timeout())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub async fn dispatch(
        &self,
        policy: &dyn RoutingPolicy,
        providers: &ProviderRegistry,
        request: &ChatRequest,
    ) -> Result<DispatchOutcome> {
        let started = Instant::now();
        let mut excluded: Vec<String> = Vec::new();
        let mut last_error: Option<ProviderError> = None;

        for attempt in 1..=self.max_attempts {
            let candidates: Cow<'_, ProviderRegistry> = if excluded.is_empty() {
                Cow::Borrowed(providers)
            } else {
                Cow::Owned(providers.excluding(excluded.as_slice()))
            };

            let decision = match policy.decide_route(request, &candidates) {
                Ok(decision) => decision,
                // Once something was executed, its error is the more useful one
                Err(route_err) => {
                    return Err(match last_error {
                        Some(exec_err) => exec_err.into(),
                        None => route_err.into(),
                    });
                }
            };

            let provider = candidates.get(&decision.provider_name).ok_or_else(|| {
                GatewayError::ProviderNotFound(decision.provider_name.clone())
            })?;

            debug!(
                provider = %decision.provider_name,
                model = %decision.model,
                attempt,
                "dispatching request"
            );

            let attempt_started = Instant::now();
            let result = match tokio::time::timeout(self.request_timeout, provider.execute(request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::timeout(
                    provider.name(),
                    format!("no response within {:?}", self.request_timeout),
                )),
            };
            let latency = attempt_started.elapsed();

            match result {
                Ok(response) => {
                    policy.record_outcome(&decision, true, latency);
                    return Ok(DispatchOutcome {
                        response,
                        decision,
                        attempts: attempt,
                        latency: started.elapsed(),
                    });
                }
                Err(err) => {
                    policy.record_failure(&decision, &err, latency);
                    warn!(
                        provider = %decision.provider_name,
                        attempt,
                        retryable = err.is_retryable(),
                        error = %err,
                        "provider execution failed"
                    );

                    if !err.is_retryable() {
                        return Err(err.into());
                    }
                    excluded.push(decision.provider_name);
                    last_error = Some(err);
                }
            }
        }

        Err(last_error
            .map(GatewayError::from)
            .unwrap_or_else(|| GatewayError::internal("dispatch made no attempts")))
    }
}
