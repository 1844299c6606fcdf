//! PDF text extraction
//!
//! Extracts text content from PDF documents using pdf-extract.

use super::{clean_text, ContentError, ExtractedDocument};
use tracing::{debug, warn};

/// PDF content extractor
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text content from PDF bytes
    pub fn extract(bytes: &[u8]) -> Result<ExtractedDocument, ContentError> {
        // pdf-extract panics on some malformed inputs instead of returning an error
        let raw = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| {
                warn!("PDF parser panicked on {} byte upload", bytes.len());
                ContentError::Parse {
                    format: "PDF",
                    message: "malformed document".to_string(),
                }
            })?
            .map_err(|e| ContentError::Parse {
                format: "PDF",
                message: e.to_string(),
            })?;

        let cleaned = clean_text(&raw);
        if cleaned.is_empty() {
            return Err(ContentError::Empty);
        }

        debug!(
            "Extracted {} characters from {} byte PDF",
            cleaned.chars().count(),
            bytes.len()
        );

        let title = Self::extract_title(&cleaned);
        let mut doc = ExtractedDocument::new(cleaned);
        if let Some(t) = title {
            doc = doc.with_title(t);
        }
        Ok(doc)
    }

    /// First substantial line among the opening lines, skipping page
    /// numbers and URLs
    fn extract_title(text: &str) -> Option<String> {
        text.lines()
            .take(5)
            .map(str::trim)
            .find(|line| {
                let len = line.chars().count();
                (10..=200).contains(&len)
                    && !line.starts_with("http")
                    && !line.starts_with("www.")
                    && !line.chars().all(|c| c.is_numeric() || c.is_whitespace())
            })
            .map(str::to_string)
    }
}
