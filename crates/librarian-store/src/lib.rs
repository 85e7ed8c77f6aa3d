//! Librarian Storage Layer
//!
//! Implements the `TrackingStore` trait over a single JSON file.
//!
//! # Architecture
//!
//! - The tracking log is one JSON array of records, loaded whole at run start
//! - Appends are read-merge-write, committed through a temp file and a rename
//! - Corrupt content is treated as an empty log, never as a fatal error
//! - An advisory lock file keeps a second writer out
//!
//! # Examples
//!
//! ```no_run
//! use librarian_store::JsonTrackingLog;
//! use librarian_domain::traits::TrackingStore;
//!
//! let log = JsonTrackingLog::open("processed.json").unwrap();
//! let _lock = log.lock().unwrap();
//! let known = log.known_ids().unwrap();
//! println!("{} documents already processed", known.len());
//! ```

#![warn(missing_docs)]

mod lock;
mod record;
mod tracking_log;

pub use lock::TrackingLock;
pub use tracking_log::JsonTrackingLog;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Another process holds the tracking log
    #[error("Tracking log {0} is locked by another run")]
    Locked(PathBuf),

    /// Write attempted through a read-only handle
    #[error("Tracking log {0} was opened read-only")]
    ReadOnly(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
