//! Router error types

/// Errors produced while deciding a route
///
/// Every variant is terminal for the request it was raised for; policies
/// never retry internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Request is missing a model or messages
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No healthy provider serving the model survived filtering
    #[error("no suitable providers for model {0}")]
    NoSuitableProvider(String),

    /// Neither the primary nor any backup can serve the model
    #[error("no available providers for model {0}")]
    NoAvailableProvider(String),

    /// Weight update rejected
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// Policy name not recognized
    #[error("unknown routing policy: {0}")]
    UnknownPolicy(String),
}

impl RouterError {
    /// Whether this error means "nothing can serve this right now"
    pub fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            RouterError::NoSuitableProvider(_) | RouterError::NoAvailableProvider(_)
        )
    }
}
