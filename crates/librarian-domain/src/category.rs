//! Category module - the closed set of document kinds

/// Category a document is filed under
///
/// Every category maps to exactly one output directory, so the
/// destination folder of a document is a pure function of its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    /// Instructional book: preface, chapters, exercises
    Textbook,

    /// Scholarly research paper: abstract, methodology, references
    Paper,

    /// Course material: slides, handouts, assignments
    LectureNotes,

    /// Informal or non-peer-reviewed writing
    Article,

    /// Anything else (last resort)
    Other,
}

impl DocumentCategory {
    /// All categories, in prompt order
    pub const ALL: [DocumentCategory; 5] = [
        DocumentCategory::Textbook,
        DocumentCategory::Paper,
        DocumentCategory::LectureNotes,
        DocumentCategory::Article,
        DocumentCategory::Other,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Textbook => "textbook",
            DocumentCategory::Paper => "paper",
            DocumentCategory::LectureNotes => "lecture_notes",
            DocumentCategory::Article => "article",
            DocumentCategory::Other => "other",
        }
    }

    /// Parse a category from its exact lowercase name
    ///
    /// Classifier output is not coerced: `"Paper"` or `"research paper"`
    /// are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "textbook" => Some(DocumentCategory::Textbook),
            "paper" => Some(DocumentCategory::Paper),
            "lecture_notes" => Some(DocumentCategory::LectureNotes),
            "article" => Some(DocumentCategory::Article),
            "other" => Some(DocumentCategory::Other),
            _ => None,
        }
    }

    /// Single-segment directory this category is filed under
    pub fn dir_name(&self) -> &'static str {
        self.as_str()
    }

    /// Relative directory as it appears in a destination path (`./paper/`)
    pub fn relative_dir(&self) -> String {
        format!("./{}/", self.dir_name())
    }
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document category: {}", s))
    }
}
