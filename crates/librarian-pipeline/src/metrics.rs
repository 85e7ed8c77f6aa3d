//! Metrics collected during a pipeline run

use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// A document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// Source file
    pub path: PathBuf,
    /// Why it failed
    pub reason: String,
}

/// A recorded document whose copy failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    /// Source file
    pub source: String,
    /// Logical destination from the record
    pub destination: String,
    /// Why the copy failed
    pub reason: String,
}

/// Counts and failures for one run
///
/// Every discovered document ends up in exactly one of `already_known`,
/// `duplicates`, `hash_failures`, `classified`, `no_content`, or `failed`.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    /// Identifier of this run, for correlating log lines
    pub run_id: Uuid,

    /// PDF files found in the source directory
    pub discovered: usize,

    /// Skipped because their hash is already in the tracking log
    pub already_known: usize,

    /// Skipped because an earlier file in this run has the same content
    pub duplicates: usize,

    /// Files that could not be hashed
    pub hash_failures: usize,

    /// Documents classified successfully
    pub classified: usize,

    /// Documents without extractable text
    pub no_content: usize,

    /// Documents whose classification failed (retried next run)
    pub failed: usize,

    /// Records appended to the tracking log
    pub recorded: usize,

    /// Files copied to their destination
    pub copied: usize,

    /// Records with no destination
    pub copy_skipped: usize,

    /// Batches processed
    pub batches: usize,

    /// Batches whose tracking log append failed
    pub commit_failures: usize,

    /// Per-document failures, in processing order
    pub failures: Vec<DocumentFailure>,

    /// Copy failures, in processing order
    pub copy_failures: Vec<CopyFailure>,

    /// Wall time of the run
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Create new empty metrics with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            discovered: 0,
            already_known: 0,
            duplicates: 0,
            hash_failures: 0,
            classified: 0,
            no_content: 0,
            failed: 0,
            recorded: 0,
            copied: 0,
            copy_skipped: 0,
            batches: 0,
            commit_failures: 0,
            failures: Vec::new(),
            copy_failures: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Record a per-document failure
    pub fn record_failure(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.failed += 1;
        self.failures.push(DocumentFailure {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// Record a failed copy
    pub fn record_copy_failure(
        &mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.copy_failures.push(CopyFailure {
            source: source.into(),
            destination: destination.into(),
            reason: reason.into(),
        });
    }

    /// Documents that reached the build step
    pub fn processed(&self) -> usize {
        self.classified + self.no_content + self.failed
    }

    /// Whether anything went wrong that the user should look at
    pub fn has_errors(&self) -> bool {
        self.failed > 0
            || self.hash_failures > 0
            || self.commit_failures > 0
            || !self.copy_failures.is_empty()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Run {}", self.run_id),
            "======================".to_string(),
            format!("Discovered: {}", self.discovered),
            format!("Already processed: {}", self.already_known),
            format!("Duplicate content: {}", self.duplicates),
            format!("Classified: {}", self.classified),
            format!("No extractable text: {}", self.no_content),
            format!("Failed: {}", self.failed),
            format!("Recorded: {}", self.recorded),
            format!("Copied: {}", self.copied),
            format!("Batches: {}", self.batches),
            format!("Elapsed: {:.1}s", self.elapsed.as_secs_f64()),
        ];

        if self.hash_failures > 0 {
            lines.push(format!("Unreadable files: {}", self.hash_failures));
        }
        if self.commit_failures > 0 {
            lines.push(format!("Tracking log write failures: {}", self.commit_failures));
        }

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failed documents:".to_string());
            for failure in &self.failures {
                lines.push(format!("  {}: {}", failure.path.display(), failure.reason));
            }
        }

        if !self.copy_failures.is_empty() {
            lines.push(String::new());
            lines.push("Copy failures:".to_string());
            for failure in &self.copy_failures {
                lines.push(format!(
                    "  {} -> {}: {}",
                    failure.source, failure.destination, failure.reason
                ));
            }
        }

        lines.join("\n")
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
