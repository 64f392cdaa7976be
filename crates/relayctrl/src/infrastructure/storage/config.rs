//! JSON configuration persistence.
//!
//! Reads and writes [`AppConfig`] as pretty-printed JSON at a path chosen on
//! the command line (default `config.json` in the working directory).  The
//! schema itself, including field names and defaults for missing fields,
//! lives in `relayctrl_core::domain::config`.

use std::path::{Path, PathBuf};

use relayctrl_core::AppConfig;
use tracing::debug;

use crate::application::manage_mappings::{ConfigError, ConfigStore};

/// [`ConfigStore`] backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Creates a store reading and writing the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonConfigStore {
    /// Loads the configuration, returning `AppConfig::default()` if the file
    /// does not yet exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not
    /// found", and [`ConfigError::Parse`] if the JSON is malformed.
    fn load(&self) -> Result<AppConfig, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(ConfigError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no config file yet, using defaults");
                Ok(AppConfig::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Persists `config`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "config written");
        Ok(())
    }
}
