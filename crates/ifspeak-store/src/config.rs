//! User settings persisted as TOML.
//!
//! ```toml
//! [general]
//! delay = 0.1
//! ```
//!
//! The in-memory config is `None` until a load succeeds. A load that hits a
//! corrupt file, or a save that fails validation, leaves it `None` so the
//! next use starts from a fresh load.

use crate::atomic::atomic_write;
use crate::errors::{
    config_invalid, config_not_loaded, config_parse, io_error, serialization, Result,
};
use ifspeak_core::delay::{validate, DEFAULT_DELAY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, warn};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "ifspeak.toml";

/// The `[general]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneralSection {
    /// Stabilization delay in seconds
    #[serde(default = "default_delay")]
    pub delay: f64,
}

fn default_delay() -> f64 {
    DEFAULT_DELAY
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Whole persisted document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AddonConfig {
    #[serde(default)]
    pub general: GeneralSection,
}

impl AddonConfig {
    fn validated(self) -> ifspeak_core::Result<Self> {
        validate(self.general.delay)?;
        Ok(self)
    }
}

/// Config file plus the last successfully loaded contents
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Option<AddonConfig>,
}

/// Config store shared between monitors and command handlers
pub type SharedConfig = Arc<RwLock<ConfigStore>>;

/// Wrap a store for sharing
pub fn shared(store: ConfigStore) -> SharedConfig {
    Arc::new(RwLock::new(store))
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.config.is_some()
    }

    /// Load from disk unless already loaded.
    ///
    /// A missing file yields defaults. A file that fails to read, parse, or
    /// validate is reported with a warning and the config stays unset.
    pub fn load(&mut self) -> Result<()> {
        if self.config.is_some() {
            return Ok(());
        }
        match self.read_file() {
            Ok(config) => {
                debug!(
                    config_path = %self.path.display(),
                    delay = config.general.delay,
                    "config loaded"
                );
                self.config = Some(config);
                Ok(())
            }
            Err(err) => {
                warn!(
                    config_path = %self.path.display(),
                    err_code = err.code(),
                    "Error loading configuration: {}",
                    err
                );
                Err(err)
            }
        }
    }

    fn read_file(&self) -> Result<AddonConfig> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AddonConfig::default());
            }
            Err(e) => return Err(io_error("config_load", &self.path, e)),
        };
        let config: AddonConfig =
            toml::from_str(&contents).map_err(|e| config_parse(&self.path, e))?;
        config
            .validated()
            .map_err(|e| config_invalid("config_load", &self.path, e))
    }

    pub fn config(&self) -> Option<&AddonConfig> {
        self.config.as_ref()
    }

    /// Current delay, `None` until loaded
    pub fn delay(&self) -> Option<f64> {
        self.config.map(|c| c.general.delay)
    }

    /// Change the in-memory delay; persisted by the next [`save`](Self::save)
    pub fn set_delay(&mut self, delay: f64) -> Result<()> {
        match self.config.as_mut() {
            Some(config) => {
                config.general.delay = delay;
                Ok(())
            }
            None => Err(config_not_loaded("config_set_delay")),
        }
    }

    /// Validate and write the config to disk.
    ///
    /// Saving before a load is a caller bug and is logged as an error.
    /// A config that fails validation is discarded and nothing is written.
    pub fn save(&mut self) -> Result<()> {
        let Some(config) = self.config else {
            let err = config_not_loaded("config_save");
            error!(
                config_path = %self.path.display(),
                err_code = err.code(),
                "Configuration was saved before loading"
            );
            return Err(err);
        };

        let config = match config.validated() {
            Ok(config) => config,
            Err(e) => {
                self.config = None;
                let err = config_invalid("config_save", &self.path, e);
                warn!(
                    config_path = %self.path.display(),
                    err_code = err.code(),
                    "Error saving configuration: {}",
                    err
                );
                return Err(err);
            }
        };

        let body = toml::to_string(&config).map_err(|e| serialization("config_save", e))?;
        atomic_write(&self.path, to_crlf(&body).as_bytes())?;
        debug!(
            config_path = %self.path.display(),
            delay = config.general.delay,
            "config saved"
        );
        Ok(())
    }
}

fn to_crlf(text: &str) -> String {
    text.lines()
        .map(|line| format!("{}\r\n", line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::new(dir.path().join(DEFAULT_CONFIG_FILE));

        store.load().unwrap();

        assert_eq!(store.delay(), Some(0.1));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_missing_delay_key_uses_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[general]\n").unwrap();
        let mut store = ConfigStore::new(&path);

        store.load().unwrap();

        assert_eq!(store.delay(), Some(DEFAULT_DELAY));
    }

    #[test]
    fn test_load_is_noop_once_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut store = ConfigStore::new(&path);
        store.load().unwrap();
        store.set_delay(0.4).unwrap();

        fs::write(&path, "[general]\ndelay = 0.9\n").unwrap();
        store.load().unwrap();

        assert_eq!(store.delay(), Some(0.4));
    }

    #[test]
    fn test_crlf_conversion() {
        assert_eq!(to_crlf("[general]\ndelay = 0.1\n"), "[general]\r\ndelay = 0.1\r\n");
    }

    #[test]
    fn test_set_delay_requires_load() {
        let mut store = ConfigStore::new("unused.toml");
        let err = store.set_delay(0.3).unwrap_err();
        assert_eq!(err.code(), "ERR_CONFIG_NOT_LOADED");
    }
}
