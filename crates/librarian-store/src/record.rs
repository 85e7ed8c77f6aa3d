//! On-disk shape of a tracking log entry

use librarian_domain::{ContentHash, FileRecord};
use serde::{Deserialize, Serialize};

/// A record as persisted in the tracking log
///
/// Fields other than `id` default to empty so entries written by older
/// tools still load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredRecord {
    pub id: String,
    #[serde(default)]
    pub old_file_path: String,
    #[serde(default)]
    pub new_file_path: String,
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub doc_description: String,
}

impl From<&FileRecord> for StoredRecord {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.as_str().to_string(),
            old_file_path: record.source_path.clone(),
            new_file_path: record.dest_path.clone(),
            doc_type: record.category.clone(),
            doc_description: record.description.clone(),
        }
    }
}

impl From<StoredRecord> for FileRecord {
    fn from(stored: StoredRecord) -> Self {
        FileRecord {
            id: ContentHash::new(stored.id),
            source_path: stored.old_file_path,
            dest_path: stored.new_file_path,
            category: stored.doc_type,
            description: stored.doc_description,
        }
    }
}
