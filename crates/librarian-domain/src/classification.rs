//! Classification results produced by the classifier

use crate::DocumentCategory;

/// Structured naming and classification metadata for one document
///
/// The proposed directory is not stored separately: it is always derived
/// from `category`, so a result can never point outside its category folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Inferred category
    pub category: DocumentCategory,

    /// Short summary naming author(s) and year when known
    pub description: String,

    /// Filesystem-safe file name (ASCII, no separators)
    proposed_name: String,
}

impl ClassificationResult {
    /// Create a result, rejecting names that are not filesystem-safe
    ///
    /// # Examples
    ///
    /// ```
    /// use librarian_domain::{ClassificationResult, DocumentCategory};
    ///
    /// let result = ClassificationResult::new(
    ///     DocumentCategory::Paper,
    ///     "A paper by John Doe (2021).",
    ///     "2021_doe_example.pdf",
    /// ).unwrap();
    /// assert_eq!(result.destination_path(), "./paper/2021_doe_example.pdf");
    ///
    /// assert!(ClassificationResult::new(DocumentCategory::Paper, "", "../escape.pdf").is_err());
    /// ```
    pub fn new(
        category: DocumentCategory,
        description: impl Into<String>,
        proposed_name: impl Into<String>,
    ) -> Result<Self, String> {
        let proposed_name = proposed_name.into();
        validate_file_name(&proposed_name)?;
        Ok(Self {
            category,
            description: description.into(),
            proposed_name,
        })
    }

    /// Proposed file name
    pub fn proposed_name(&self) -> &str {
        &self.proposed_name
    }

    /// Proposed directory, derived from the category (`./paper/`)
    pub fn proposed_dir(&self) -> String {
        self.category.relative_dir()
    }

    /// Logical destination path: `proposed_dir / proposed_name`
    pub fn destination_path(&self) -> String {
        format!("{}{}", self.proposed_dir(), self.proposed_name)
    }
}

/// Check that a proposed file name is safe to use as a single path component
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("file name is empty".to_string());
    }
    if !name.is_ascii() {
        return Err(format!("file name '{}' is not ASCII", name));
    }
    if name == "." || name == ".." {
        return Err(format!("file name '{}' is not a file", name));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!("file name '{}' contains a path separator", name));
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err(format!("file name '{}' contains control characters", name.escape_default()));
    }
    Ok(())
}
