//! PDF text extraction

use librarian_domain::traits::TextExtractor;
use librarian_domain::Extraction;
use std::path::Path;
use tracing::{debug, warn};

/// [`TextExtractor`] backed by `pdf-extract`
///
/// Every failure, including a panic inside the PDF parser, is reported as
/// [`Extraction::NoContent`].
///
/// `pdf-extract` has no page limit of its own: the whole document is parsed
/// and only then cut to `max_pages`. The limit bounds the text handed to the
/// classifier, not the time spent extracting a very long PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract from in-memory PDF bytes
    pub fn extract_bytes(&self, bytes: &[u8], max_pages: usize) -> Extraction {
        // pdf-extract can panic on malformed fonts and glyph tables
        let pages = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        })) {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Extraction::NoContent(format!("PDF extraction failed: {}", e)),
            Err(_) => return Extraction::NoContent("PDF parser panicked".to_string()),
        };

        let total = pages.len();
        let text = pages
            .into_iter()
            .take(max_pages)
            .collect::<Vec<_>>()
            .join("\n");
        debug!(
            "Extracted {} chars from {} of {} pages",
            text.len(),
            total.min(max_pages),
            total
        );

        Extraction::from_text(text)
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path, max_pages: usize) -> Extraction {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return Extraction::NoContent(format!("Failed to read file: {}", e));
            }
        };

        let extraction = self.extract_bytes(&bytes, max_pages);
        if let Extraction::NoContent(reason) = &extraction {
            warn!("No text from {}: {}", path.display(), reason);
        }
        extraction
    }
}
