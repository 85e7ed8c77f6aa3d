//! Configuration for the Classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Maximum excerpt length sent to the model (characters); longer text is truncated
    pub max_text_length: usize,

    /// Maximum time for a single classification call (seconds)
    pub classification_timeout_secs: u64,

    /// Ask the provider for schema-constrained output when it supports it
    #[serde(default = "default_structured_output")]
    pub structured_output: bool,
}

fn default_structured_output() -> bool {
    true
}

impl ClassifierConfig {
    /// Get the classification timeout as a Duration
    pub fn classification_timeout(&self) -> Duration {
        Duration::from_secs(self.classification_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.classification_timeout_secs == 0 {
            return Err("classification_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 60_000,
            classification_timeout_secs: 120,
            structured_output: true,
        }
    }
}

impl ClassifierConfig {
    /// Aggressive preset: short excerpts and timeouts for cheap, fast runs
    pub fn aggressive() -> Self {
        Self {
            max_text_length: 15_000,
            classification_timeout_secs: 45,
            structured_output: true,
        }
    }

    /// Lenient preset: long excerpts and timeouts for slow local models
    pub fn lenient() -> Self {
        Self {
            max_text_length: 120_000,
            classification_timeout_secs: 600,
            structured_output: true,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
