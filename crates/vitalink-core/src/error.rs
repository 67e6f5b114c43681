//! Centralized error types for Vitalink.

use thiserror::Error;

/// Main error type for Vitalink operations.
#[derive(Error, Debug)]
pub enum VitalError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] vitalink_store::StoreError),
}

/// Result type for Vitalink operations.
pub type VitalResult<T> = Result<T, VitalError>;

impl VitalError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an unauthorized error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }
}
