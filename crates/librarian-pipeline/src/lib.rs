//! Librarian Pipeline
//!
//! The idempotent batch pipeline that files PDF documents.
//!
//! # Overview
//!
//! For every PDF in a source directory the pipeline:
//! - **Hashes** the content (SHA-256), the only deduplication key
//! - **Filters** out documents already in the tracking log
//! - **Extracts** text from the leading pages
//! - **Classifies** the text into a category, description, and file name
//! - **Records** the outcome in the tracking log, one append per batch
//! - **Copies** the file to `<output>/<category>/<name>`
//!
//! # Failure isolation
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Unreadable file | Counted, skipped, retried next run |
//! | No extractable text | Recorded without a destination, not retried |
//! | Classification error or timeout | Counted, not recorded, retried next run |
//! | Tracking log write | Counted, batch copied anyway, retried next run |
//! | Copy | Counted, record kept |
//!
//! # Usage
//!
//! ```no_run
//! use librarian_classifier::{Classifier, ClassifierConfig};
//! use librarian_llm::OpenAiProvider;
//! use librarian_pipeline::{BatchRunner, DescriptorBuilder, FileRelocator, PdfTextExtractor, PipelineConfig};
//! use librarian_store::JsonTrackingLog;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = OpenAiProvider::new(std::env::var("OPENAI_API_KEY")?, "gpt-4o-mini")?;
//!     let config = PipelineConfig::default();
//!     let classifier = Classifier::new(llm, ClassifierConfig::default());
//!     let builder = DescriptorBuilder::new(classifier, PdfTextExtractor::new(), config.max_pages);
//!     let store = JsonTrackingLog::open("processed.json")?;
//!     let _lock = store.lock()?;
//!
//!     let mut runner = BatchRunner::new(builder, store.clone(), FileRelocator::new("sorted"), config);
//!     let metrics = runner.run("inbox".as_ref()).await?;
//!     println!("{}", metrics.summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! batch_size = 5
//! max_pages = 20
//! recursive = false
//! dry_run = false
//! record_empty_documents = true
//! ```

#![warn(missing_docs)]

mod config;
mod descriptor;
mod error;
mod extract;
mod hasher;
mod metrics;
mod notes;
mod relocate;
mod runner;

pub use config::PipelineConfig;
pub use descriptor::{BuildOutcome, DescriptorBuilder};
pub use error::PipelineError;
pub use extract::PdfTextExtractor;
pub use hasher::hash_file;
pub use metrics::{CopyFailure, DocumentFailure, RunMetrics};
pub use notes::{export_notes, note_file_name, ExportedNote};
pub use relocate::{resolve_destination, FileRelocator, RelocationOutcome};
pub use runner::{enumerate_pdfs, BatchRunner, RunPhase};
