//! Plain text extraction

use super::{clean_text, ContentError, ExtractedDocument};

/// Plain text extractor
pub struct TextExtractor;

impl TextExtractor {
    /// Decode UTF-8 bytes (an optional BOM is dropped) and clean them up
    pub fn extract(bytes: &[u8]) -> Result<ExtractedDocument, ContentError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ContentError::Unsupported(format!("text is not valid UTF-8: {}", e)))?;

        let cleaned = clean_text(text);
        if cleaned.is_empty() {
            return Err(ContentError::Empty);
        }

        let title = Self::extract_title(&cleaned);
        let mut doc = ExtractedDocument::new(cleaned);
        if let Some(t) = title {
            doc = doc.with_title(t);
        }
        Ok(doc)
    }

    /// Markdown `# ` header among the first lines, otherwise the first line
    fn extract_title(content: &str) -> Option<String> {
        let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = lines.next()?;
        if let Some(title) = first.strip_prefix("# ") {
            return Some(title.trim().to_string());
        }
        if first.chars().count() <= 200 {
            Some(first.to_string())
        } else {
            None
        }
    }
}
