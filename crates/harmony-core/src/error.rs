//! Error types for invariant evaluation
//!
//! Provides a unified error type for all harmony crates.

use thiserror::Error;

/// Core error type for harmony operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a smoothing factor outside (0, 1]
    pub fn invalid_smoothing_factor(alpha: f64) -> Self {
        Self::InvalidParameter(format!("Smoothing factor {alpha} must be in (0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a duration that must be strictly positive
    pub fn non_positive_duration(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be positive and finite, got {value}"))
    }
}
