//! Stub service errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the seed or starting the stub.
#[derive(Debug, Error)]
pub enum StubError {
    /// The seed file could not be read.
    #[error("Failed to read seed file {path}: {source}")]
    ReadSeed {
        /// Path of the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The seed document is not valid JSON of the expected shape.
    #[error("Invalid seed document: {0}")]
    InvalidSeed(#[from] serde_json::Error),

    /// The listener could not be bound.
    #[error("Failed to bind stub listener on {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: std::net::SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure.
    #[error("Stub I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for stub operations.
pub type StubResult<T> = Result<T, StubError>;
