//! Recorded expected response bodies.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// An expected response body read from disk.
///
/// Loaded fresh for every comparison; nothing caches fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureFile {
    /// Path the fixture was read from.
    pub path: PathBuf,
    /// Full file content.
    pub content: String,
}

impl FixtureFile {
    /// Creates a fixture from already-read content.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// The text a response body is compared against.
    ///
    /// Exactly one trailing line terminator (`\n` or `\r\n`) is dropped, the
    /// way an end-of-input scanner reads a file. Everything else is kept.
    #[must_use]
    pub fn expected_body(&self) -> &str {
        self.content
            .strip_suffix("\r\n")
            .or_else(|| self.content.strip_suffix('\n'))
            .unwrap_or(&self.content)
    }
}

/// Fixtures loaded for one scenario run, keyed by the path they were requested with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureSet {
    files: HashMap<PathBuf, FixtureFile>,
}

impl FixtureSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a fixture under the path it was requested with.
    pub fn insert(&mut self, requested: impl Into<PathBuf>, fixture: FixtureFile) {
        self.files.insert(requested.into(), fixture);
    }

    /// Looks up a fixture by requested path.
    #[must_use]
    pub fn get(&self, requested: &Path) -> Option<&FixtureFile> {
        self.files.get(requested)
    }

    /// Number of fixtures held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no fixture was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
