//! Provider error handling
//!
//! Single error type for every backend behind a `ProviderHandle`.
//!
//! | Variant | Purpose | HTTP Status | Retryable |
//! |------|------|------------|--------|
//! | Authentication | Authentication failed | 401 | No |
//! | RateLimit | Rate limit exceeded | 429 | Yes |
//! | ModelNotFound | Model not served | 404 | No |
//! | InvalidRequest | Invalid request | 400 | No |
//! | Network | Network error | 502 | Yes |
//! | Timeout | Timeout | 504 | Yes |
//! | ProviderUnavailable | Backend down | 503 | Yes |
//! | NotImplemented | Capability missing | 501 | No |
//! | EstimateUnavailable | No price/latency data | 422 | No |
//! | Other | Other error | 502 | No |
//!
//! Retryable errors may be retried by the dispatcher against the same request
//! on another provider; everything else propagates to the caller.

/// Unified provider error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication { provider: String, message: String },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: String,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Model '{model}' not found for {provider}")]
    ModelNotFound { provider: String, model: String },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest { provider: String, message: String },

    #[error("Network error for {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("Timeout for {provider}: {message}")]
    Timeout { provider: String, message: String },

    #[error("Provider {provider} is unavailable: {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Feature '{feature}' not implemented for {provider}")]
    NotImplemented { provider: String, feature: String },

    #[error("No {estimate} estimate from {provider} for model '{model}'")]
    EstimateUnavailable {
        provider: String,
        model: String,
        estimate: &'static str,
    },

    #[error("{provider} error: {message}")]
    Other { provider: String, message: String },
}

impl ProviderError {
    pub fn authentication(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider: provider.into(),
            message: match retry_after {
                Some(secs) => format!("retry after {}s", secs),
                None => "rate limited".to_string(),
            },
            retry_after,
        }
    }

    pub fn model_not_found(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider: provider.into(),
            model: model.into(),
        }
    }

    pub fn invalid_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn timeout(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_implemented(provider: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::NotImplemented {
            provider: provider.into(),
            feature: feature.into(),
        }
    }

    pub fn cost_unavailable(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::EstimateUnavailable {
            provider: provider.into(),
            model: model.into(),
            estimate: "cost",
        }
    }

    pub fn latency_unavailable(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self::EstimateUnavailable {
            provider: provider.into(),
            model: model.into(),
            estimate: "latency",
        }
    }

    pub fn other(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Name of the provider that produced this error
    pub fn provider(&self) -> &str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::ModelNotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ProviderUnavailable { provider, .. }
            | Self::NotImplemented { provider, .. }
            | Self::EstimateUnavailable { provider, .. }
            | Self::Other { provider, .. } => provider,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::RateLimit { .. }
            | Self::ProviderUnavailable { .. } => true,

            Self::Authentication { .. }
            | Self::ModelNotFound { .. }
            | Self::InvalidRequest { .. }
            | Self::NotImplemented { .. }
            | Self::EstimateUnavailable { .. }
            | Self::Other { .. } => false,
        }
    }

    /// True when the request, not the provider, is at fault
    pub fn is_request_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::ModelNotFound { .. } | Self::NotImplemented { .. }
        )
    }

    /// Seconds to wait before retrying, when the backend said so
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Authentication { .. } => 401,
            Self::RateLimit { .. } => 429,
            Self::ModelNotFound { .. } => 404,
            Self::InvalidRequest { .. } => 400,
            Self::Network { .. } | Self::Other { .. } => 502,
            Self::Timeout { .. } => 504,
            Self::ProviderUnavailable { .. } => 503,
            Self::NotImplemented { .. } => 501,
            Self::EstimateUnavailable { .. } => 422,
        }
    }
}
