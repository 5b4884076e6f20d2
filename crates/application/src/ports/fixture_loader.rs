//! Fixture loading port

use std::future::Future;
use std::path::{Path, PathBuf};

use apiprobe_domain::FixtureFile;
use thiserror::Error;

/// Errors raised while reading a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file does not exist.
    #[error("fixture not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The fixture is not valid UTF-8 text.
    #[error("fixture is not valid UTF-8: {}", .0.display())]
    InvalidEncoding(PathBuf),

    /// Any other I/O failure.
    #[error("failed to read fixture {}: {source}", path.display())]
    Io {
        /// Fixture path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Port for reading expected response bodies.
///
/// Every call reads the file again; implementations must not cache.
pub trait FixtureLoader: Send + Sync {
    /// Reads one fixture file in full.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::NotFound` if the file is missing.
    fn load(&self, path: &Path) -> impl Future<Output = Result<FixtureFile, FixtureError>> + Send;
}
