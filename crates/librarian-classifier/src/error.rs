//! Error types for the Classifier

use thiserror::Error;

/// Errors that can occur during classification
///
/// Every variant is a per-document failure: the caller excludes the
/// document from the batch and it is retried on the next run.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Classification timeout
    #[error("Classification timed out after {0}s")]
    Timeout(u64),

    /// Response does not match the classification schema
    #[error("Invalid classification format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::JsonParse(e.to_string())
    }
}
