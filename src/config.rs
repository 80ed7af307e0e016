//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the user's default
//! conversion options in TOML format with platform-specific directory
//! resolution. Command-line flags always take precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_DIR_NAME;
use crate::models::{Options, PartRegistry};

/// Default conversion options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Diode short name (e.g. "tht", "smd")
    pub diode: String,
    /// Switch mount short name (e.g. "mx", "choc")
    pub switch: String,
    /// Center multi-unit switches on the schematic
    pub center_switches: bool,
    /// Reject layouts that are not in row-major reading order
    pub validate_order: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let options = Options::default();
        Self {
            diode: options.diode,
            switch: options.switch,
            center_switches: options.center_switches,
            validate_order: options.validate_order,
        }
    }
}

/// Output location configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Directory for generated scripts (next to the input when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/klepcb/config.toml`
/// - macOS: `~/Library/Application Support/klepcb/config.toml`
/// - Windows: `%APPDATA%\klepcb\config.toml`
///
/// # Validation
///
/// - `defaults.diode` must name a registered diode
/// - `defaults.switch` must name a registered switch mount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default conversion options
    pub defaults: DefaultsConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when the
    /// file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path, registry: &PartRegistry) -> Result<()> {
        self.validate(registry)?;

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp config file: {}", temp_path.display()))?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates the default part names against `registry`.
    pub fn validate(&self, registry: &PartRegistry) -> Result<()> {
        if registry.diode(&self.defaults.diode).is_none() {
            anyhow::bail!(
                "Unknown default diode '{}'. Available: {}",
                self.defaults.diode,
                names(registry.diodes())
            );
        }

        if registry.switch(&self.defaults.switch).is_none() {
            anyhow::bail!(
                "Unknown default switch '{}'. Available: {}",
                self.defaults.switch,
                names(registry.switches())
            );
        }

        Ok(())
    }

    /// Conversion options from the configured defaults.
    #[must_use]
    pub fn options(&self) -> Options {
        Options::new(&self.defaults.diode, &self.defaults.switch)
            .with_center_switches(self.defaults.center_switches)
            .with_validate_order(self.defaults.validate_order)
    }
}

fn names(entries: &[crate::models::PartEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
