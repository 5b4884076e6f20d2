//! Harness settings.
//!
//! Values are layered, later sources winning:
//!
//! | Source | Example |
//! |--------|---------|
//! | built-in defaults | `base_url = "https://jsonplaceholder.typicode.com"` |
//! | `apiprobe.toml` (optional) | `timeout_ms = 5000` |
//! | environment | `APIPROBE_BASE_URL=http://localhost:3000` |

use std::path::{Path, PathBuf};

use apiprobe_infrastructure::DEFAULT_TIMEOUT_MS;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Public service the scenarios are written against.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Directory holding the expected response bodies.
pub const DEFAULT_FIXTURES_DIR: &str = "fixtures/json_files";

/// Seed document for the local stub.
pub const DEFAULT_SEED_FILE: &str = "fixtures/db.json";

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "apiprobe.toml";

/// Prefix of the environment overrides (`APIPROBE_TIMEOUT_MS`, ...).
pub const ENV_PREFIX: &str = "APIPROBE";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or a value has the wrong type.
    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A zero timeout would fail every request.
    #[error("timeout_ms must be greater than zero")]
    InvalidTimeout,
}

/// Runtime settings of the harness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Root URL every scenario path is appended to.
    pub base_url: String,
    /// Directory fixture names are resolved against.
    pub fixtures_dir: PathBuf,
    /// Seed document served by `--stub`.
    pub seed_file: PathBuf,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Stop a scenario's assertions at the first failure.
    pub stop_on_failure: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            seed_file: PathBuf::from(DEFAULT_SEED_FILE),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            stop_on_failure: false,
        }
    }
}

impl Settings {
    /// Loads defaults, then `file` if it exists, then `APIPROBE_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is invalid.
    pub fn load(file: &Path) -> Result<Self, SettingsError> {
        Self::load_with(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`Settings::load`] with an explicit environment source.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed or a value is invalid.
    pub fn load_with(file: &Path, env: Environment) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default(
                "fixtures_dir",
                defaults.fixtures_dir.to_string_lossy().into_owned(),
            )?
            .set_default("seed_file", defaults.seed_file.to_string_lossy().into_owned())?
            .set_default("timeout_ms", defaults.timeout_ms)?
            .set_default("stop_on_failure", defaults.stop_on_failure)?
            .add_source(File::from(file).format(FileFormat::Toml).required(false))
            .add_source(env.try_parsing(true))
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Points the harness at another service.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Checks values the type system does not.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] or [`SettingsError::InvalidTimeout`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |reason: String| SettingsError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if self.timeout_ms == 0 {
            return Err(SettingsError::InvalidTimeout);
        }
        Ok(())
    }
}
