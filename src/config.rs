//! Configuration file loading.
//!
//! The config lives at `<config_dir>/keycalc/config.toml`. Every section is
//! optional; a missing default file means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How readouts are printed.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Display text, prefixed by the pending operator
    #[default]
    Text,
    /// One JSON object per readout
    Json,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Prefix text output with the pending operator glyph.
    pub show_operator: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_operator: true,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    /// Extra keyboard bindings: key name to keypad label.
    pub keys: HashMap<String, String>,
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse config")
    }

    /// Load the config from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_file(path);
        }

        match default_path() {
            Some(path) if path.exists() => Self::load_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!(path = %path.display(), bindings = config.keys.len(), "Loaded config");
        Ok(config)
    }
}

/// Default config file location.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("keycalc").join("config.toml"))
}
