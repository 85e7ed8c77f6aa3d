//! Copies recorded documents to their destination

use filetime::{set_file_times, FileTime};
use librarian_domain::FileRecord;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Result of relocating one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    /// Copied to the given path
    Copied(PathBuf),

    /// Nothing to copy (record has no destination)
    Skipped,

    /// Copy failed, with the reason
    Failed(String),
}

/// Resolve a logical destination (`./paper/x.pdf`) under an output root
///
/// Relative paths land under `output_root` with any leading `./` dropped.
/// Absolute paths are returned unchanged.
pub fn resolve_destination(dest_path: &str, output_root: &Path) -> PathBuf {
    let path = Path::new(dest_path);
    if path.is_absolute() {
        warn!("Destination {} is absolute; using it as is", dest_path);
        return path.to_path_buf();
    }

    let relative = dest_path
        .strip_prefix("./")
        .or_else(|| dest_path.strip_prefix(".\\"))
        .unwrap_or(dest_path);

    let mut resolved = output_root.to_path_buf();
    for component in Path::new(relative).components() {
        if !matches!(component, Component::CurDir) {
            resolved.push(component);
        }
    }
    resolved
}

/// Copies source files into an output directory tree
///
/// Copies preserve permissions and access/modification times. The source
/// file is never modified.
#[derive(Debug, Clone)]
pub struct FileRelocator {
    output_root: PathBuf,
}

impl FileRelocator {
    /// Create a relocator rooted at `output_root`
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Root directory destinations resolve under
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Copy a record's source file to its destination
    ///
    /// Never panics or returns an error; failures come back as
    /// [`RelocationOutcome::Failed`].
    pub fn relocate(&self, record: &FileRecord) -> RelocationOutcome {
        if !record.has_destination() {
            return RelocationOutcome::Skipped;
        }

        let source = Path::new(&record.source_path);
        let destination = resolve_destination(&record.dest_path, &self.output_root);

        match copy_preserving_times(source, &destination) {
            Ok(()) => {
                debug!("Copied {} -> {}", source.display(), destination.display());
                RelocationOutcome::Copied(destination)
            }
            Err(reason) => {
                warn!(
                    "Failed to copy {} -> {}: {}",
                    source.display(),
                    destination.display(),
                    reason
                );
                RelocationOutcome::Failed(reason)
            }
        }
    }
}

fn copy_preserving_times(source: &Path, destination: &Path) -> Result<(), String> {
    let metadata = fs::metadata(source).map_err(|e| match e.kind() {
        ErrorKind::NotFound => format!("source {} not found", source.display()),
        ErrorKind::PermissionDenied => format!("permission denied reading {}", source.display()),
        _ => format!("cannot read {}: {}", source.display(), e),
    })?;

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create directory {}: {}", parent.display(), e))?;
    }

    if destination.exists() {
        warn!("Overwriting existing file {}", destination.display());
    }

    fs::copy(source, destination).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => format!("permission denied writing {}", destination.display()),
        _ => format!("copy failed: {}", e),
    })?;

    restore_times(destination, &metadata);
    Ok(())
}

/// Carry the source's access and modification times over to `destination`
///
/// The copy already exists at this point, so a failure only warns.
fn restore_times(destination: &Path, source_metadata: &fs::Metadata) -> bool {
    let atime = FileTime::from_last_access_time(source_metadata);
    let mtime = FileTime::from_last_modification_time(source_metadata);
    match set_file_times(destination, atime, mtime) {
        Ok(()) => true,
        Err(e) => {
            warn!("Copied {} but could not set its timestamps: {}", destination.display(), e);
            false
        }
    }
}
