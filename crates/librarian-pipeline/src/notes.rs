//! Export record descriptions as markdown notes

use crate::PipelineError;
use librarian_domain::FileRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A note written by [`export_notes`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedNote {
    /// Note file that was written
    pub path: PathBuf,
    /// Logical destination of the document it describes
    pub document: String,
}

/// Note file name for a logical destination path
///
/// Takes the base name, removes `.pdf`, turns underscores into spaces,
/// and appends `.md`: `./paper/2021_doe_example.pdf` → `2021 doe example.md`.
/// Returns `None` if nothing is left.
pub fn note_file_name(dest_path: &str) -> Option<String> {
    let base = dest_path.rsplit(['/', '\\']).next().unwrap_or(dest_path);
    let stem = base.replace(".pdf", "").replace('_', " ");
    let stem = stem.trim();
    if stem.is_empty() {
        None
    } else {
        Some(format!("{}.md", stem))
    }
}

/// Write one markdown note per matching record into `output_dir`
///
/// A record matches when its category contains `doc_type` and it has a
/// destination. The note holds the record's description. Existing notes
/// with the same name are overwritten.
pub fn export_notes(
    records: &[FileRecord],
    output_dir: &Path,
    doc_type: &str,
) -> Result<Vec<ExportedNote>, PipelineError> {
    fs::create_dir_all(output_dir).map_err(|e| PipelineError::io(output_dir, e))?;

    let mut exported = Vec::new();
    for record in records {
        if !record.category.contains(doc_type) || !record.has_destination() {
            continue;
        }

        let Some(name) = note_file_name(&record.dest_path) else {
            warn!("No usable note name for {}", record.dest_path);
            continue;
        };

        let path = output_dir.join(name);
        fs::write(&path, &record.description).map_err(|e| PipelineError::io(&path, e))?;
        debug!("Wrote {}", path.display());

        exported.push(ExportedNote {
            path,
            document: record.dest_path.clone(),
        });
    }

    Ok(exported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_file_name() {
        assert_eq!(
            note_file_name("./paper/2021_doe_example.pdf").as_deref(),
            Some("2021 doe example.md")
        );
        assert_eq!(note_file_name("plain.pdf").as_deref(), Some("plain.md"));
        assert_eq!(note_file_name(".\\paper\\a_b.pdf").as_deref(), Some("a b.md"));
        assert_eq!(note_file_name("./paper/_x_.pdf").as_deref(), Some("x.md"));
    }

    #[test]
    fn test_note_file_name_empty() {
        assert_eq!(note_file_name("./paper/.pdf"), None);
        assert_eq!(note_file_name("./paper/"), None);
        assert_eq!(note_file_name(""), None);
    }
}
