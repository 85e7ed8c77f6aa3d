//! Wire shape of a classification response

use librarian_domain::classification::validate_file_name;
use librarian_domain::{ClassificationResult, DocumentCategory};
use serde::{Deserialize, Serialize};

/// Raw classification as returned by the LLM
///
/// Field names follow the JSON the model is asked to produce. Unknown
/// fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ClassificationCandidate {
    pub doc_type: String,
    pub description: String,
    pub new_file_name: String,
    pub path_to_file: String,
}

impl ClassificationCandidate {
    /// Validate the candidate and convert it to a domain result
    pub fn validate(self) -> Result<ClassificationResult, String> {
        let category = DocumentCategory::parse(&self.doc_type).ok_or_else(|| {
            format!(
                "docType '{}' is not one of textbook, paper, lecture_notes, article, other",
                self.doc_type
            )
        })?;

        let dir = normalize_dir(&self.path_to_file);
        if dir.is_empty() || dir.contains('/') || dir.contains('\\') {
            return Err(format!(
                "pathToFile '{}' is not a single relative directory",
                self.path_to_file
            ));
        }
        if dir != category.dir_name() {
            return Err(format!(
                "pathToFile '{}' does not match docType '{}'",
                self.path_to_file, self.doc_type
            ));
        }

        if self.description.trim().is_empty() {
            return Err("description is empty".to_string());
        }

        validate_file_name(&self.new_file_name).map_err(|e| format!("newFileName: {}", e))?;

        ClassificationResult::new(category, self.description, self.new_file_name)
    }
}

/// Strip a leading `./` and trailing separators: `./paper/` → `paper`
fn normalize_dir(path: &str) -> &str {
    let path = path.trim();
    let path = path
        .strip_prefix("./")
        .or_else(|| path.strip_prefix(".\\"))
        .unwrap_or(path);
    path.trim_end_matches(['/', '\\'])
}
