/// Configuration for folio
///
/// Read from `~/.folio/config.json`. Every field is optional; a missing or
/// broken file means defaults. `FOLIO_CONTENT` overrides the content file path.

use crate::core::DEFAULT_DEBOUNCE;
use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable pointing at a content file
pub const CONTENT_ENV_VAR: &str = "FOLIO_CONTENT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// JSON content file. None means the built-in content.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Where the config file lives, if there's a home directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".folio").join("config.json"))
    }

    /// Load config from a file, falling back to defaults if it doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load config, logging and ignoring a file that can't be used
    ///
    /// A missing file is normal. An unreadable, malformed or invalid one is
    /// reported at warn level and the defaults are used instead.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring config file, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the default location and apply environment overrides
    pub fn load_default() -> Self {
        let config = match Self::default_path() {
            Some(path) => Self::load_or_default(path),
            None => Self::default(),
        };

        config.with_content_override(std::env::var_os(CONTENT_ENV_VAR))
    }

    /// Replace the content path when an override is set and non-empty
    pub fn with_content_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.content.path = Some(PathBuf::from(value));
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.debounce_ms == 0 {
            return Err(FolioError::Config(
                "search.debounce_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }
}
