//! Configuration management for the application.
//!
//! This module handles loading and validating user configuration in TOML
//! format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_NAME, CONFIG_DIR_ENV, KEYBOARDS_DIR, QMK_HOME_ENV};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// QMK firmware directory path (e.g., "/`path/to/qmk_firmware`")
    pub qmk_firmware: Option<PathBuf>,
}

/// Default identifiers used when neither flags nor the working directory name them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Default keyboard (e.g., "crkbd/rev1")
    pub keyboard: Option<String>,
    /// Default keymap (e.g., "default")
    pub keymap: Option<String>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/qmkgen/config.toml`
/// - macOS: `~/Library/Application Support/qmkgen/config.toml`
/// - Windows: `%APPDATA%\qmkgen\config.toml`
///
/// `QMKGEN_CONFIG_DIR` replaces the directory part when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Keyboard and keymap defaults
    #[serde(default)]
    pub user: UserConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// A configured QMK firmware path must exist and contain a keyboards/ directory.
    pub fn validate(&self) -> Result<()> {
        if let Some(qmk_path) = &self.paths.qmk_firmware {
            if !qmk_path.exists() {
                anyhow::bail!("QMK firmware path does not exist: {}", qmk_path.display());
            }

            let keyboards_dir = qmk_path.join(KEYBOARDS_DIR);
            if !keyboards_dir.is_dir() {
                anyhow::bail!(
                    "QMK firmware path is invalid: keyboards/ directory not found at {}",
                    keyboards_dir.display()
                );
            }
        }

        Ok(())
    }

    /// Resolves the QMK firmware root.
    ///
    /// Precedence: explicit path, `QMK_HOME`, configured path, current directory.
    pub fn resolve_qmk_home(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        if let Some(home) = std::env::var_os(QMK_HOME_ENV).filter(|h| !h.is_empty()) {
            return Ok(PathBuf::from(home));
        }

        if let Some(path) = &self.paths.qmk_firmware {
            return Ok(path.clone());
        }

        std::env::current_dir().context("Failed to determine current directory")
    }
}
