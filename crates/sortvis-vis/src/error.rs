//! Error types for sortvis-vis.

use thiserror::Error;

/// Result type for sortvis-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a visualization.
#[derive(Debug, Error)]
pub enum Error {
    /// Trace generation rejected its input.
    #[error("trace error: {0}")]
    Trace(#[from] sortvis_trace::Error),

    /// The request needs playback to be idle.
    #[error("playback is active")]
    PlaybackActive,

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
