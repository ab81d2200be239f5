//! Error handling for the gateway
//!
//! Layer-specific errors (`ProviderError`, `RouterError`) fold into
//! `GatewayError`, which is what handlers and the binary see.

use crate::core::providers::ProviderError;
use crate::core::router::RouterError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend execution errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Routing decision errors
    #[error(transparent)]
    Routing(#[from] RouterError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider not registered
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Duplicate provider registration
    #[error("Provider already registered: {0}")]
    DuplicateProvider(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Provider(err) => err.is_retryable(),
            GatewayError::Routing(err) => err.is_service_unavailable(),
            GatewayError::Timeout(_) => true,
            _ => false,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Config(_) | GatewayError::Yaml(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            GatewayError::Serialization(_) => (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR"),
            GatewayError::Provider(err) => (
                StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::BAD_GATEWAY),
                "PROVIDER_ERROR",
            ),
            GatewayError::Routing(RouterError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            GatewayError::Routing(err) if err.is_service_unavailable() => {
                (StatusCode::SERVICE_UNAVAILABLE, "NO_HEALTHY_PROVIDERS")
            }
            GatewayError::Routing(_) => (StatusCode::BAD_REQUEST, "ROUTING_ERROR"),
            GatewayError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            GatewayError::ProviderNotFound(_) => (StatusCode::NOT_FOUND, "PROVIDER_NOT_FOUND"),
            GatewayError::DuplicateProvider(_) => (StatusCode::CONFLICT, "DUPLICATE_PROVIDER"),
            GatewayError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            GatewayError::Io(_) | GatewayError::Server(_) | GatewayError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                retryable: self.is_retryable(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub retryable: bool,
    pub timestamp: i64,
}
