//! Configuration for pipeline runs

use serde::{Deserialize, Serialize};

/// Configuration for a [`BatchRunner`](crate::BatchRunner) run
///
/// # Examples
///
/// ```
/// use librarian_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.batch_size, 5);
/// assert_eq!(config.max_pages, 20);
/// assert!(config.record_empty_documents);
///
/// let config = PipelineConfig::from_toml("batch_size = 10\nmax_pages = 5").unwrap();
/// assert_eq!(config.batch_size, 10);
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Documents per durability checkpoint
    pub batch_size: usize,

    /// Leading pages to extract text from
    pub max_pages: usize,

    /// Descend into subdirectories of the source directory
    pub recursive: bool,

    /// Classify and log planned destinations without recording or copying
    pub dry_run: bool,

    /// Record documents without extractable text so they are not retried
    pub record_empty_documents: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_pages: 20,
            recursive: false,
            dry_run: false,
            record_empty_documents: true,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        if self.max_pages == 0 {
            return Err("max_pages must be at least 1".to_string());
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.max_pages, 20);
        assert!(!config.recursive);
        assert!(!config.dry_run);
        assert!(config.record_empty_documents);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = PipelineConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = PipelineConfig {
            batch_size: 3,
            recursive: true,
            ..Default::default()
        };
        let toml_str = config.to_toml().unwrap();
        assert_eq!(PipelineConfig::from_toml(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("record_empty_documents = false").unwrap();
        assert!(!config.record_empty_documents);
        assert_eq!(config.batch_size, 5);
    }
}
