//! Batch runner: enumerate, filter, build, commit

use crate::descriptor::{hash_blocking, BuildOutcome, DescriptorBuilder};
use crate::relocate::{FileRelocator, RelocationOutcome};
use crate::{PipelineConfig, PipelineError, RunMetrics};
use librarian_domain::traits::{LlmProvider, TextExtractor, TrackingStore};
use librarian_domain::{ContentHash, FileRecord};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Phase of a run, logged on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Not running
    Idle,
    /// Listing candidate files
    Enumerating,
    /// Hashing candidates and dropping known ones
    Filtering,
    /// Building records for one batch
    BuildingBatch,
    /// Persisting and copying one batch
    CommittingBatch,
    /// Run finished
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Enumerating => "enumerating",
            RunPhase::Filtering => "filtering",
            RunPhase::BuildingBatch => "building batch",
            RunPhase::CommittingBatch => "committing batch",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// List `.pdf` files (any case) in `dir`, sorted by path
///
/// Only direct children unless `recursive`. Symlinks are followed, so a
/// linked PDF counts as a file. Unreadable entries and symlink loops are
/// skipped with a warning.
pub fn enumerate_pdfs(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(max_depth)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            paths.push(entry.into_path());
        }
    }

    paths.sort();
    Ok(paths)
}

/// Runs the idempotent batch pipeline over a source directory
///
/// Each document is hashed, checked against the tracking log, extracted,
/// classified, and recorded. Records are appended once per batch and only
/// then copied, so a crash loses at most the batch in flight. A document
/// whose classification fails is not recorded and is retried next run.
///
/// # Examples
///
/// ```no_run
/// use librarian_classifier::{Classifier, ClassifierConfig};
/// use librarian_pipeline::{BatchRunner, DescriptorBuilder, FileRelocator, PdfTextExtractor, PipelineConfig};
/// use librarian_store::JsonTrackingLog;
/// # use librarian_domain::traits::LlmProvider;
/// # async fn example<L>(llm: L) -> Result<(), Box<dyn std::error::Error>>
/// # where L: LlmProvider + Send + Sync + 'static, L::Error: std::fmt::Display {
///
/// let config = PipelineConfig::default();
/// let classifier = Classifier::new(llm, ClassifierConfig::default());
/// let builder = DescriptorBuilder::new(classifier, PdfTextExtractor::new(), config.max_pages);
/// let store = JsonTrackingLog::open("processed.json")?;
///
/// let mut runner = BatchRunner::new(builder, store, FileRelocator::new("sorted"), config);
/// let metrics = runner.run("inbox".as_ref()).await?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct BatchRunner<L, E, S>
where
    L: LlmProvider,
{
    builder: DescriptorBuilder<L, E>,
    store: S,
    relocator: FileRelocator,
    config: PipelineConfig,
    phase: RunPhase,
}

impl<L, E, S> BatchRunner<L, E, S>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: fmt::Display,
    E: TextExtractor + Send + Sync + 'static,
    S: TrackingStore,
    S::Error: fmt::Display,
{
    /// Create a new BatchRunner
    pub fn new(
        builder: DescriptorBuilder<L, E>,
        store: S,
        relocator: FileRelocator,
        config: PipelineConfig,
    ) -> Self {
        Self {
            builder,
            store,
            relocator,
            config,
            phase: RunPhase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The tracking store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the runner, returning the tracking store
    pub fn into_store(self) -> S {
        self.store
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!("Phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Process every new PDF in `source_dir`
    ///
    /// Per-document failures are counted in the returned metrics, not
    /// returned as errors. Errors are reserved for a bad configuration, an
    /// unreadable source directory, or an unreadable tracking log.
    pub async fn run(&mut self, source_dir: &Path) -> Result<RunMetrics, PipelineError> {
        self.config.validate().map_err(PipelineError::Config)?;

        let start = Instant::now();
        let mut metrics = RunMetrics::new();
        info!(run_id = %metrics.run_id, "Starting run over {}", source_dir.display());
        if self.config.dry_run {
            info!("Dry run: nothing will be recorded or copied");
        }

        self.enter(RunPhase::Enumerating);
        let candidates = enumerate_pdfs(source_dir, self.config.recursive)?;
        metrics.discovered = candidates.len();
        info!("Found {} PDF files", candidates.len());

        self.enter(RunPhase::Filtering);
        let mut known = self
            .store
            .known_ids()
            .map_err(|e| PipelineError::Store(e.to_string()))?;
        let pending = self.filter(candidates, &known, &mut metrics).await;
        info!(
            "{} new, {} already processed, {} duplicates",
            pending.len(),
            metrics.already_known,
            metrics.duplicates
        );

        let total_batches = pending.len().div_ceil(self.config.batch_size);
        for (index, batch) in pending.chunks(self.config.batch_size).enumerate() {
            info!("Batch {}/{} ({} files)", index + 1, total_batches, batch.len());

            self.enter(RunPhase::BuildingBatch);
            let records = self.build_batch(batch, &mut metrics).await;

            self.enter(RunPhase::CommittingBatch);
            self.commit_batch(records, &mut known, &mut metrics);
            metrics.batches += 1;
        }

        self.enter(RunPhase::Done);
        metrics.elapsed = start.elapsed();
        info!(
            run_id = %metrics.run_id,
            "Run complete: {} recorded, {} copied, {} failed",
            metrics.recorded,
            metrics.copied,
            metrics.failed
        );

        Ok(metrics)
    }

    /// Hash candidates and drop known ids and in-run duplicates
    async fn filter(
        &self,
        candidates: Vec<PathBuf>,
        known: &HashSet<ContentHash>,
        metrics: &mut RunMetrics,
    ) -> Vec<(PathBuf, ContentHash)> {
        let mut seen = HashSet::new();
        let mut pending = Vec::new();

        for path in candidates {
            let id = match hash_blocking(path.clone()).await {
                Ok(id) => id,
                Err(e) => {
                    warn!("Failed to hash {}: {}", path.display(), e);
                    metrics.hash_failures += 1;
                    continue;
                }
            };

            if known.contains(&id) {
                debug!("{} [{}]: already processed", path.display(), id.short());
                metrics.already_known += 1;
            } else if !seen.insert(id.clone()) {
                info!(
                    "{} [{}]: same content as an earlier file, skipping",
                    path.display(),
                    id.short()
                );
                metrics.duplicates += 1;
            } else {
                pending.push((path, id));
            }
        }

        pending
    }

    /// Build records for one batch, isolating per-document failures
    async fn build_batch(
        &self,
        batch: &[(PathBuf, ContentHash)],
        metrics: &mut RunMetrics,
    ) -> Vec<FileRecord> {
        let mut records = Vec::with_capacity(batch.len());

        for (path, id) in batch {
            match self.builder.build_hashed(path, id.clone()).await {
                Ok(BuildOutcome::Classified(record)) => {
                    metrics.classified += 1;
                    records.push(record);
                }
                Ok(BuildOutcome::NoContent { record, reason }) => {
                    metrics.no_content += 1;
                    if self.config.record_empty_documents {
                        info!("{}: no usable text ({}), marking as processed", path.display(), reason);
                        records.push(record);
                    } else {
                        info!("{}: no usable text ({}), leaving for a later run", path.display(), reason);
                    }
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", path.display(), e);
                    metrics.record_failure(path, e.to_string());
                }
            }
        }

        records
    }

    /// Append a batch to the tracking log, then copy each record
    ///
    /// A failed append is logged and counted; the copies still go ahead and
    /// the documents will be processed again next run.
    fn commit_batch(
        &mut self,
        records: Vec<FileRecord>,
        known: &mut HashSet<ContentHash>,
        metrics: &mut RunMetrics,
    ) {
        if records.is_empty() {
            debug!("Nothing to commit");
            return;
        }

        if self.config.dry_run {
            for record in &records {
                if record.has_destination() {
                    info!("[dry run] {} -> {}", record.source_path, record.dest_path);
                } else {
                    info!("[dry run] {} would be marked as processed", record.source_path);
                }
            }
            return;
        }

        match self.store.append(&records) {
            Ok(()) => {
                metrics.recorded += records.len();
                known.extend(records.iter().map(|r| r.id.clone()));
                info!("Recorded {} documents", records.len());
            }
            Err(e) => {
                error!("Failed to append {} records to tracking log: {}", records.len(), e);
                metrics.commit_failures += 1;
            }
        }

        for record in &records {
            match self.relocator.relocate(record) {
                RelocationOutcome::Copied(_) => metrics.copied += 1,
                RelocationOutcome::Skipped => metrics.copy_skipped += 1,
                RelocationOutcome::Failed(reason) => {
                    metrics.record_copy_failure(&record.source_path, &record.dest_path, reason)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.Pdf", "pdf"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/d.pdf"), b"x").unwrap();

        let found = enumerate_pdfs(dir.path(), false).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf", "c.Pdf"]);
    }

    #[test]
    fn test_enumerate_recursive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        fs::write(dir.path().join("sub/deeper/b.pdf"), b"x").unwrap();

        let found = enumerate_pdfs(dir.path(), true).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[1].ends_with("sub/deeper/b.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn test_enumerate_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let inbox = dir.path().join("inbox");
        fs::create_dir(&inbox).unwrap();
        let target = dir.path().join("elsewhere.pdf");
        fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, inbox.join("linked.pdf")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.pdf"), inbox.join("dangling.pdf")).unwrap();

        let found = enumerate_pdfs(&inbox, false).unwrap();
        assert_eq!(found, vec![inbox.join("linked.pdf")]);
    }

    #[test]
    fn test_enumerate_missing_dir() {
        let result = enumerate_pdfs(Path::new("/nonexistent/inbox"), false);
        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::CommittingBatch.to_string(), "committing batch");
    }
}
