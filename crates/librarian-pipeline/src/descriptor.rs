//! Builds the record for one document: hash, extract, classify

use crate::hasher::hash_file;
use crate::PipelineError;
use librarian_classifier::Classifier;
use librarian_domain::traits::{LlmProvider, TextExtractor};
use librarian_domain::{ContentHash, Extraction, FileRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Outcome of building a record for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Classified; the record has a destination
    Classified(FileRecord),

    /// No usable text; the record has no destination
    NoContent {
        /// Record marking the document as seen
        record: FileRecord,
        /// Why no text was extracted
        reason: String,
    },
}

impl BuildOutcome {
    /// The record, whichever way the document went
    pub fn record(&self) -> &FileRecord {
        match self {
            BuildOutcome::Classified(record) => record,
            BuildOutcome::NoContent { record, .. } => record,
        }
    }

    /// Take the record
    pub fn into_record(self) -> FileRecord {
        match self {
            BuildOutcome::Classified(record) => record,
            BuildOutcome::NoContent { record, .. } => record,
        }
    }
}

/// Turns a source path into a [`FileRecord`]
///
/// Hashing and extraction run on the blocking pool; classification runs
/// under the classifier's timeout. A classification error is returned to
/// the caller and no record is produced.
pub struct DescriptorBuilder<L, E>
where
    L: LlmProvider,
{
    classifier: Classifier<L>,
    extractor: Arc<E>,
    max_pages: usize,
}

impl<L, E> DescriptorBuilder<L, E>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
    E: TextExtractor + Send + Sync + 'static,
{
    /// Create a new DescriptorBuilder
    pub fn new(classifier: Classifier<L>, extractor: E, max_pages: usize) -> Self {
        Self {
            classifier,
            extractor: Arc::new(extractor),
            max_pages,
        }
    }

    /// Build a record, hashing the file first
    pub async fn build(&self, path: &Path) -> Result<BuildOutcome, PipelineError> {
        let id = hash_blocking(path.to_path_buf()).await?;
        self.build_hashed(path, id).await
    }

    /// Build a record for a file whose hash is already known
    pub async fn build_hashed(
        &self,
        path: &Path,
        id: ContentHash,
    ) -> Result<BuildOutcome, PipelineError> {
        let source = path.display().to_string();

        let extraction = self.extract_blocking(path.to_path_buf()).await?;
        let text = match extraction {
            Extraction::Text(text) => text,
            Extraction::NoContent(reason) => {
                debug!("{} [{}]: no content ({})", source, id.short(), reason);
                return Ok(BuildOutcome::NoContent {
                    record: FileRecord::no_content(id, source),
                    reason,
                });
            }
        };

        let classification = self.classifier.classify(&text).await?;
        debug!(
            "{} [{}] -> {}",
            source,
            id.short(),
            classification.destination_path()
        );

        Ok(BuildOutcome::Classified(FileRecord::classified(
            id,
            source,
            &classification,
        )))
    }

    async fn extract_blocking(&self, path: PathBuf) -> Result<Extraction, PipelineError> {
        let extractor = Arc::clone(&self.extractor);
        let max_pages = self.max_pages;

        tokio::task::spawn_blocking(move || extractor.extract(&path, max_pages))
            .await
            .map_err(|e| PipelineError::Worker(format!("Task join error: {}", e)))
    }
}

/// Hash a file on the blocking pool
pub(crate) async fn hash_blocking(path: PathBuf) -> Result<ContentHash, PipelineError> {
    tokio::task::spawn_blocking(move || hash_file(&path))
        .await
        .map_err(|e| PipelineError::Worker(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use librarian_classifier::{ClassifierConfig, ClassifierError};
    use librarian_llm::MockProvider;
    use std::fs;
    use tempfile::TempDir;

    const PAPER: &str = r#"{"docType": "paper", "description": "A paper by John Doe (2021).", "newFileName": "2021_doe_example.pdf", "pathToFile": "./paper/"}"#;

    /// Treats the file's bytes as its text
    struct PlainTextExtractor;

    impl TextExtractor for PlainTextExtractor {
        fn extract(&self, path: &Path, _max_pages: usize) -> Extraction {
            match fs::read_to_string(path) {
                Ok(text) => Extraction::from_text(text),
                Err(e) => Extraction::NoContent(e.to_string()),
            }
        }
    }

    fn builder(llm: MockProvider) -> DescriptorBuilder<MockProvider, PlainTextExtractor> {
        let classifier = Classifier::new(llm, ClassifierConfig::default());
        DescriptorBuilder::new(classifier, PlainTextExtractor, 20)
    }

    #[tokio::test]
    async fn test_build_classified() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan1.pdf");
        fs::write(&path, "Abstract: we study examples").unwrap();

        let outcome = builder(MockProvider::new(PAPER)).build(&path).await.unwrap();

        let record = match outcome {
            BuildOutcome::Classified(record) => record,
            other => panic!("expected classified, got {:?}", other),
        };
        assert_eq!(record.dest_path, "./paper/2021_doe_example.pdf");
        assert_eq!(record.source_path, path.display().to_string());
        assert_eq!(record.id, hash_file(&path).unwrap());
    }

    #[tokio::test]
    async fn test_build_no_content_skips_llm() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.pdf");
        fs::write(&path, "   \n").unwrap();

        let llm = MockProvider::new(PAPER);
        let probe = llm.clone();
        let outcome = builder(llm).build(&path).await.unwrap();

        assert!(matches!(outcome, BuildOutcome::NoContent { .. }));
        assert!(!outcome.record().has_destination());
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_build_classification_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weird.pdf");
        fs::write(&path, "some text").unwrap();

        let result = builder(MockProvider::new("not json")).build(&path).await;
        assert!(matches!(
            result,
            Err(PipelineError::Classification(ClassifierError::JsonParse(_)))
        ));
    }

    #[tokio::test]
    async fn test_build_hash_error() {
        let result = builder(MockProvider::new(PAPER))
            .build(Path::new("/nonexistent/a.pdf"))
            .await;
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }

    #[tokio::test]
    async fn test_build_hashed_uses_given_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.pdf");
        fs::write(&path, "text").unwrap();

        let outcome = builder(MockProvider::new(PAPER))
            .build_hashed(&path, ContentHash::new("given"))
            .await
            .unwrap();
        assert_eq!(outcome.into_record().id.as_str(), "given");
    }
}
