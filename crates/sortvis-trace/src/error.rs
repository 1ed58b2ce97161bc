//! Error types for sortvis-trace.

use thiserror::Error;

/// Result type for sortvis-trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when the input to a trace is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A random array was requested with no elements.
    #[error("invalid array size: {0} (must be at least 1)")]
    InvalidSize(usize),

    /// The value range is empty.
    #[error("invalid value range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// An element cannot be ordered against the others.
    #[error("value at index {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },
}
