//! Application settings configuration.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ConfigError, Result};
use crate::quickaccess::HelpEntry;

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Value the palette opens with when none is given on the command line.
    pub default_value: String,
    /// Whether the built-in providers are registered.
    pub builtin_providers: bool,
    /// Message overrides keyed by message id.
    pub messages: HashMap<String, String>,
    /// Additional providers declared by the user.
    pub providers: Vec<ProviderConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_value: "?".to_string(),
            builtin_providers: true,
            messages: HashMap::new(),
            providers: Vec::new(),
        }
    }
}

/// A user-declared provider serving a fixed item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Activation prefix.
    pub prefix: String,
    /// Input hint shown while the provider is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Entries listed in quick access help.
    #[serde(default)]
    pub help: Vec<HelpEntry>,
    /// Items listed when the provider is active.
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// One item of a user-declared provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Row text.
    pub label: String,
    /// Secondary text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quick access value opened when the item is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file yields the default settings.
    pub fn load() -> Result<Self> {
        Self::load_from(&super::config_path()?)
    }

    /// Load settings from `path`.
    ///
    /// A missing file yields the default settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file exists but cannot be read,
    /// or `ConfigError::ParseError` if it is not valid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&content)?;
        info!(
            path = %path.display(),
            providers = settings.providers.len(),
            "Loaded configuration"
        );
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}
