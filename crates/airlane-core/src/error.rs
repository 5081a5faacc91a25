//! Error types for the decision engine.

use std::time::Duration;
use thiserror::Error;

/// Failure of a distance estimator backend.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("estimator timed out after {0:?}")]
    Timeout(Duration),

    #[error("routing provider request failed: {0}")]
    Transport(String),

    #[error("routing provider returned HTTP {0}")]
    Status(u16),

    #[error("routing provider returned an unusable route: {0}")]
    InvalidRoute(String),
}

impl EstimatorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, EstimatorError::Timeout(_))
    }
}

/// Errors surfaced by [`crate::engine::DecisionEngine::decide`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("distance estimate unavailable: {0}")]
    EstimatorUnavailable(#[from] EstimatorError),

    #[error("internal fault: {0}")]
    InternalFault(String),
}

impl EngineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidRequest(message.into())
    }
}
