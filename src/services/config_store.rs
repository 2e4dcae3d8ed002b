use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Values remembered between runs.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_food_log: Option<String>,
}

/// JSON key/value file under the user's config directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/ingredient-iq/config.json`
    pub fn default_location() -> Result<Self, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(config_dir.join("ingredient-iq").join("config.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty store.
    pub fn load(&self) -> Result<StoredConfig, ConfigError> {
        if !self.path.exists() {
            log::debug!("No config store at {}, starting empty", self.path.display());
            return Ok(StoredConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &StoredConfig) -> Result<(), ConfigError> {
        let persist_err = |source: io::Error| ConfigError::Persist {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(persist_err)?;
        }

        let content = serde_json::to_string_pretty(config).map_err(|e| persist_err(e.into()))?;
        write_private(&self.path, &content).map_err(persist_err)?;
        log::debug!("💾 Config store written to {}", self.path.display());
        Ok(())
    }

    /// Loads, applies `edit`, and writes back.
    pub fn update(&self, edit: impl FnOnce(&mut StoredConfig)) -> Result<(), ConfigError> {
        let mut config = self.load().unwrap_or_else(|e| {
            log::warn!("⚠️ Ignoring unreadable config store: {}", e);
            StoredConfig::default()
        });
        edit(&mut config);
        self.save(&config)
    }
}

/// Writes `content` readable by the owner only, since the store holds the API key.
fn write_private(path: &Path, content: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // `mode` only applies to new files; tighten one left by an older run.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(content.as_bytes())
}
