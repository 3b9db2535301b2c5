//! Configuration management for quickhelp.
//!
//! This module handles loading and saving the user configuration, including
//! message overrides and user-declared quick access providers.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::{ItemConfig, ProviderConfig, Settings};

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for `Settings`.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The default configuration file path.
///
/// - Linux: `~/.config/quickhelp/config.toml`
/// - macOS: `~/Library/Application Support/quickhelp/config.toml`
/// - Windows: `C:\Users\<User>\AppData\Roaming\quickhelp\config.toml`
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("quickhelp").join("config.toml"))
}
