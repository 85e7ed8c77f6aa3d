//! Text extraction outcome

/// Text pulled from a document, or the reason nothing usable came out
///
/// Extraction never fails loudly: a malformed or image-only PDF is
/// `NoContent`, which callers treat as "nothing to classify".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Non-empty extracted text
    Text(String),

    /// No usable text, with a human-readable reason
    NoContent(String),
}

impl Extraction {
    /// Wrap extracted text, mapping whitespace-only text to `NoContent`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Extraction::NoContent("document contains no extractable text".to_string())
        } else {
            Extraction::Text(text)
        }
    }

    /// Extracted text, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Extraction::Text(text) => Some(text),
            Extraction::NoContent(_) => None,
        }
    }

    /// Whether extraction produced usable text
    pub fn has_text(&self) -> bool {
        matches!(self, Extraction::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_is_no_content() {
        assert!(!Extraction::from_text("  \n\t ").has_text());
        assert!(!Extraction::from_text("").has_text());
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let extraction = Extraction::from_text(" Abstract ");
        assert_eq!(extraction.text(), Some(" Abstract "));
    }
}
