//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ContentHash, Extraction, FileRecord};
use std::collections::HashSet;
use std::path::Path;

/// Durable store of processing records
///
/// Implemented by the infrastructure layer (librarian-store). Writers are
/// assumed to be exclusive: `append` is read-merge-write, not a streaming
/// append, so two concurrent writers can lose records.
pub trait TrackingStore {
    /// Error type for store operations
    type Error;

    /// Every id ever recorded
    fn known_ids(&self) -> Result<HashSet<ContentHash>, Self::Error>;

    /// Every record, in append order
    fn records(&self) -> Result<Vec<FileRecord>, Self::Error>;

    /// Append a batch of records
    fn append(&mut self, records: &[FileRecord]) -> Result<(), Self::Error>;
}

/// Bounded-page text extraction from a binary document
///
/// Implemented by the pipeline layer (librarian-pipeline). Infallible by
/// contract: every failure is reported as [`Extraction::NoContent`].
pub trait TextExtractor {
    /// Extract text from at most `max_pages` leading pages
    fn extract(&self, path: &Path, max_pages: usize) -> Extraction;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (librarian-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    ///
    /// `schema` is a JSON schema document the response should conform to.
    /// Providers without native support may ignore it.
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}
