//! Application error types

use apiprobe_domain::DomainError;
use thiserror::Error;

use crate::ports::{FixtureError, HttpClientError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// A fixture could not be read.
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
