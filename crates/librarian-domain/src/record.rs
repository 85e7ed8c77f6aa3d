//! File records - the persisted outcome of processing one document

use crate::ClassificationResult;
use std::fmt;

/// SHA-256 digest of a document's bytes, as lowercase hex
///
/// This is the sole deduplication key: two files with identical bytes
/// share a hash regardless of name or location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Wrap a digest string
    ///
    /// No format check is done here so records written by older tools
    /// still load; use [`ContentHash::is_sha256_hex`] to check.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// The digest string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like a lowercase hex SHA-256 digest
    pub fn is_sha256_hex(&self) -> bool {
        self.0.len() == 64
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    /// Short prefix for log lines
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        self.0.get(..end).unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record of a processed document
///
/// Immutable once appended to the tracking log. A record with an empty
/// `dest_path` marks a document that was processed but had no usable
/// text: it is never copied, but it is not retried either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Content hash of the source file
    pub id: ContentHash,

    /// Path of the original document
    pub source_path: String,

    /// Logical destination (`./paper/2021_doe_example.pdf`), empty if none
    pub dest_path: String,

    /// Category name, empty if the document was not classified
    pub category: String,

    /// Classifier description, empty if the document was not classified
    pub description: String,
}

impl FileRecord {
    /// Record for a successfully classified document
    pub fn classified(
        id: ContentHash,
        source_path: impl Into<String>,
        classification: &ClassificationResult,
    ) -> Self {
        Self {
            id,
            source_path: source_path.into(),
            dest_path: classification.destination_path(),
            category: classification.category.as_str().to_string(),
            description: classification.description.clone(),
        }
    }

    /// Record for a document with no extractable text
    pub fn no_content(id: ContentHash, source_path: impl Into<String>) -> Self {
        Self {
            id,
            source_path: source_path.into(),
            dest_path: String::new(),
            category: String::new(),
            description: String::new(),
        }
    }

    /// Whether this record asks for a physical copy
    pub fn has_destination(&self) -> bool {
        !self.dest_path.is_empty()
    }
}
