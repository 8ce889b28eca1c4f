//! Core error types.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Errors that can occur while encoding features, scaling, or fitting and
/// querying classifiers.
#[derive(Error, Debug)]
pub enum CardioError {
    /// Insufficient data rows for the operation
    #[error("Insufficient data: need at least {required} rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter or input field value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet
    #[error("Model must be fitted before prediction")]
    NotFitted,

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid feature or label data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
