//! Advisory single-writer lock for a tracking log

use crate::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive lock on `<tracking-file>.lock`, released on drop
#[derive(Debug)]
pub struct TrackingLock {
    file: File,
    path: PathBuf,
}

impl TrackingLock {
    /// Take the lock without blocking
    pub(crate) fn acquire(path: &Path) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| StoreError::io(path, e))?;

        file.try_lock_exclusive()
            .map_err(|_| StoreError::Locked(path.to_path_buf()))?;

        debug!("Acquired tracking log lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TrackingLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!("Released tracking log lock {}", self.path.display());
    }
}
