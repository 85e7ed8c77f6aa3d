//! Configuration management for the CLI.
//!
//! Settings are resolved in order: command-line flag, environment
//! variable, config file, built-in default.

use crate::cli::Provider;
use crate::error::{CliError, Result};
use librarian_pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language model settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Pipeline defaults
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Language model settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Backend to use
    #[serde(default)]
    pub provider: Provider,

    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Provider base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Per-document classification timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".librarian").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. The default path falls back to the
    /// built-in defaults when it is missing.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.pipeline.validate().map_err(CliError::Config)?;
        Ok(config)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { color: true }
    }
}

fn default_true() -> bool {
    true
}
