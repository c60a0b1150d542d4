//! Error types
//!
//! All failures are detected at the boundary of the builder and the
//! recovery engine; nothing partial is returned on error.

use thiserror::Error;

/// Hopfield network errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HopfieldError {
    #[error("Shape mismatch: expected length {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl HopfieldError {
    pub(crate) fn shape(expected: usize, actual: usize) -> Self {
        HopfieldError::Shape { expected, actual }
    }
}

/// Result type for Hopfield operations
pub type Result<T> = std::result::Result<T, HopfieldError>;
