//! Error types for the CLI application.

use librarian_llm::LlmError;
use librarian_pipeline::PipelineError;
use librarian_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider setup error
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Tracking log error
    #[error("Tracking log error: {0}")]
    Store(#[from] StoreError),

    /// Pipeline error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
