//! Error types for pipeline operations

use librarian_classifier::ClassifierError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Filesystem error on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Classification failed for a document
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifierError),

    /// Tracking log error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
