//! JSON file implementation of the tracking log

use crate::lock::TrackingLock;
use crate::record::StoredRecord;
use crate::StoreError;
use librarian_domain::traits::TrackingStore;
use librarian_domain::{ContentHash, FileRecord};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Tracking log stored as a single JSON array file
///
/// Every read goes to disk; nothing is cached between calls. Writers
/// must be exclusive, see [`JsonTrackingLog::lock`]. A handle from
/// [`JsonTrackingLog::open_read_only`] never touches the file.
#[derive(Debug, Clone)]
pub struct JsonTrackingLog {
    path: PathBuf,
    read_only: bool,
}

impl JsonTrackingLog {
    /// Open a tracking log, creating it (and its parent directories)
    /// holding `[]` if it does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let log = Self {
            path: path.as_ref().to_path_buf(),
            read_only: false,
        };
        if !log.path.exists() {
            debug!("Creating tracking log {}", log.path.display());
            log.write_entries(&[])?;
        }
        Ok(log)
    }

    /// Open a tracking log for reading only
    ///
    /// A missing file reads as empty and is not created. Corrupt content
    /// is left as it is, and appends fail with [`StoreError::ReadOnly`].
    pub fn open_read_only(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            read_only: true,
        }
    }

    /// Whether this handle refuses writes
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Path of the tracking log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the advisory single-writer lock
    ///
    /// Fails with [`StoreError::Locked`] if another process holds it.
    pub fn lock(&self) -> Result<TrackingLock, StoreError> {
        TrackingLock::acquire(&self.lock_path())
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Every recorded id
    ///
    /// Never fails: an unreadable log reads as empty, and unparseable or
    /// non-array content is reset to `[]` with a warning (left untouched on
    /// a read-only handle). Entries that are not objects with a string `id`
    /// are ignored.
    pub fn load_known_ids(&self) -> HashSet<ContentHash> {
        self.read_entries_or_reset()
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str))
            .map(ContentHash::new)
            .collect()
    }

    /// Every well-formed record, in file order
    ///
    /// Malformed entries are skipped with a warning.
    pub fn load_records(&self) -> Result<Vec<FileRecord>, StoreError> {
        let entries = self.read_entries()?.unwrap_or_default();
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<StoredRecord>(entry) {
                Ok(stored) => records.push(FileRecord::from(stored)),
                Err(e) => warn!(
                    "Skipping malformed entry {} in {}: {}",
                    index,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(records)
    }

    /// Append records with a read-merge-write
    ///
    /// Existing entries are kept as they are on disk, including ones this
    /// crate cannot interpret. Corrupt content is replaced.
    pub fn append_records(&self, records: &[FileRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        if self.read_only {
            return Err(StoreError::ReadOnly(self.path.clone()));
        }

        let mut entries = self.read_entries()?.unwrap_or_default();
        for record in records {
            entries.push(serde_json::to_value(StoredRecord::from(record))?);
        }
        self.write_entries(&entries)?;

        debug!(
            "Appended {} records to {} ({} total)",
            records.len(),
            self.path.display(),
            entries.len()
        );
        Ok(())
    }

    /// Read the array of entries
    ///
    /// `Ok(None)` when the file is missing, empty, unparseable, or not an
    /// array. Only I/O failures are errors.
    fn read_entries(&self) -> Result<Option<Vec<Value>>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => Ok(Some(entries)),
            Ok(_) => {
                warn!(
                    "Tracking log {} does not hold a JSON array; treating it as empty",
                    self.path.display()
                );
                Ok(None)
            }
            Err(e) => {
                warn!(
                    "Tracking log {} is not valid JSON ({}); treating it as empty",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    fn read_entries_or_reset(&self) -> Vec<Value> {
        match self.read_entries() {
            Ok(Some(entries)) => entries,
            Ok(None) if self.read_only => Vec::new(),
            Ok(None) => {
                if let Err(e) = self.write_entries(&[]) {
                    warn!("Failed to reinitialize tracking log: {}", e);
                }
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to read tracking log: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the file contents through a sibling temp file and a rename
    fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        let file = File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer
            .write_all(b"\n")
            .and_then(|_| writer.flush())
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| StoreError::io(&tmp_path, e))?;

        // Atomic rename
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }
}

impl TrackingStore for JsonTrackingLog {
    type Error = StoreError;

    fn known_ids(&self) -> Result<HashSet<ContentHash>, Self::Error> {
        Ok(self.load_known_ids())
    }

    fn records(&self) -> Result<Vec<FileRecord>, Self::Error> {
        self.load_records()
    }

    fn append(&mut self, records: &[FileRecord]) -> Result<(), Self::Error> {
        self.append_records(records)
    }
}
