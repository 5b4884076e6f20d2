//! Fixture files read from the local file system.

use std::path::{Path, PathBuf};

use apiprobe_application::ports::{FixtureError, FixtureLoader};
use apiprobe_domain::FixtureFile;
use tokio::fs;
use tracing::debug;

/// Reads fixtures with `tokio::fs`, relative to a fixtures directory.
#[derive(Debug, Clone)]
pub struct FsFixtureLoader {
    root: PathBuf,
}

impl FsFixtureLoader {
    /// Creates a loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute paths are kept; relative ones are joined to the root.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl FixtureLoader for FsFixtureLoader {
    async fn load(&self, path: &Path) -> Result<FixtureFile, FixtureError> {
        let full = self.resolve(path);
        let bytes = fs::read(&full).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FixtureError::NotFound(full.clone())
            } else {
                FixtureError::Io {
                    path: full.clone(),
                    source: e,
                }
            }
        })?;

        let content =
            String::from_utf8(bytes).map_err(|_| FixtureError::InvalidEncoding(full.clone()))?;
        debug!(path = %full.display(), bytes = content.len(), "fixture loaded");

        Ok(FixtureFile::new(full, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_relative_to_root() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("posts.json"), "[\n  {}\n]\n").expect("write");

        let loader = FsFixtureLoader::new(dir.path());
        let fixture = loader.load(Path::new("posts.json")).await.expect("load");

        assert_eq!(fixture.path, dir.path().join("posts.json"));
        assert_eq!(fixture.content, "[\n  {}\n]\n");
        assert_eq!(fixture.expected_body(), "[\n  {}\n]");
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_root() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join("abs.json");
        std::fs::write(&file, "{}").expect("write");

        let loader = FsFixtureLoader::new("/nonexistent");
        let fixture = loader.load(&file).await.expect("load");

        assert_eq!(fixture.content, "{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempdir().expect("temp dir");
        let loader = FsFixtureLoader::new(dir.path());

        let result = loader.load(Path::new("missing.json")).await;

        assert!(matches!(result, Err(FixtureError::NotFound(p)) if p == dir.path().join("missing.json")));
    }

    #[tokio::test]
    async fn test_changes_on_disk_are_seen() {
        let dir = tempdir().expect("temp dir");
        let file = dir.path().join("f.json");
        let loader = FsFixtureLoader::new(dir.path());

        std::fs::write(&file, "1").expect("write");
        let first = loader.load(Path::new("f.json")).await.expect("load");
        std::fs::write(&file, "2").expect("write");
        let second = loader.load(Path::new("f.json")).await.expect("load");

        assert_eq!(first.content, "1");
        assert_eq!(second.content, "2");
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("bin.json"), [0xff, 0xfe, 0x00]).expect("write");
        let loader = FsFixtureLoader::new(dir.path());

        let result = loader.load(Path::new("bin.json")).await;

        assert!(matches!(result, Err(FixtureError::InvalidEncoding(_))));
    }
}
