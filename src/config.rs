//! Configuration and persisted preferences
//!
//! `StudioConfig` is layered from built-in defaults, an optional TOML
//! file, and `CNACK_*` environment variables. `Preferences` is a small
//! process-wide key-value store (JSON under the user config directory)
//! used for flags that survive restarts, currently the light/dark theme.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Studio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Base URL of the analysis service
    pub endpoint: String,

    /// Analysis request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3001".to_string(),
            timeout_secs: 30,
        }
    }
}

impl StudioConfig {
    /// Load configuration: defaults, then an optional TOML file, then
    /// `CNACK_*` environment variables (e.g. `CNACK_ENDPOINT`)
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = StudioConfig::default();
        let mut builder = config::Config::builder()
            .set_default("endpoint", defaults.endpoint)?
            .set_default("timeout_secs", defaults.timeout_secs as i64)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        } else if let Some(path) = Self::default_file() {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("CNACK"))
            .build()?;

        let loaded: StudioConfig = settings.try_deserialize()?;
        debug!(endpoint = %loaded.endpoint, "configuration loaded");
        Ok(loaded)
    }

    /// Default config file location (`<config dir>/cnack-studio/studio.toml`)
    fn default_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cnack-studio").join("studio.toml"))
    }
}

/// Persisted key-value preference store
///
/// Flat string map serialized as JSON. Missing or unreadable stores are
/// treated as empty; reads never fail.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// Load from the default store location
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load from an explicit path (missing file yields an empty store)
    pub fn load_from(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "malformed preference store, starting empty");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Read a preference value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a preference value (in memory; call `save` to persist)
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Persist to the default store location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::default_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Persist to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!(path = %path.display(), "preferences saved");
        Ok(())
    }

    /// Default store location (`<config dir>/cnack-studio/preferences.json`)
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cnack-studio").join("preferences.json"))
    }
}
