//! Content extraction module
//!
//! Turns uploaded bytes into plain text ready for chunking. PDF is the
//! primary format; UTF-8 text files are accepted as-is.

mod pdf;
mod text;

pub use pdf::PdfExtractor;
pub use text::TextExtractor;

use std::path::Path;

/// Errors raised while extracting text from an upload
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The bytes could not be parsed as the detected format
    #[error("Failed to parse {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// Parsing succeeded but yielded no text (e.g. image-only PDF)
    #[error("Document contains no extractable text")]
    Empty,

    /// The upload is neither a PDF nor UTF-8 text
    #[error("Unsupported content type: {0}")]
    Unsupported(String),
}

/// Extracted document content
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// The extracted text content
    pub content: String,
    /// Document title (if detected)
    pub title: Option<String>,
}

impl ExtractedDocument {
    pub fn new(content: String) -> Self {
        Self {
            content,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Supported content types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// PDF document
    Pdf,
    /// Plain text (.txt, .md, etc.)
    Text,
    /// Unknown/unsupported
    Unknown,
}

impl ContentType {
    /// Detect content type from a file name's extension
    pub fn from_filename(name: &str) -> Self {
        Self::from_extension(Path::new(name))
    }

    /// Detect content type from file extension
    pub fn from_extension(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("pdf") => ContentType::Pdf,
            Some("txt" | "md" | "markdown" | "text") => ContentType::Text,
            _ => ContentType::Unknown,
        }
    }

    /// Detect content type from MIME type
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_lowercase();
        if mime.contains("application/pdf") {
            ContentType::Pdf
        } else if mime.contains("text/plain") || mime.contains("text/markdown") {
            ContentType::Text
        } else {
            ContentType::Unknown
        }
    }

    /// Detect content type from the leading bytes
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            ContentType::Pdf
        } else if std::str::from_utf8(bytes).is_ok() {
            ContentType::Text
        } else {
            ContentType::Unknown
        }
    }

    /// Combine declared MIME type, file name and magic bytes.
    ///
    /// Magic bytes win for PDFs, since browsers often send
    /// `application/octet-stream` for drag-and-drop uploads.
    pub fn detect(mime: Option<&str>, filename: Option<&str>, bytes: &[u8]) -> Self {
        let sniffed = Self::sniff(bytes);
        if sniffed == ContentType::Pdf {
            return ContentType::Pdf;
        }
        let declared = mime
            .map(Self::from_mime)
            .filter(|t| *t != ContentType::Unknown)
            .or_else(|| filename.map(Self::from_filename))
            .unwrap_or(ContentType::Unknown);
        match declared {
            ContentType::Unknown => sniffed,
            other => other,
        }
    }
}

/// Extract text from bytes with a known content type
pub fn extract_from_bytes(
    bytes: &[u8],
    content_type: ContentType,
) -> Result<ExtractedDocument, ContentError> {
    match content_type {
        ContentType::Pdf => PdfExtractor::extract(bytes),
        ContentType::Text => TextExtractor::extract(bytes),
        ContentType::Unknown => Err(ContentError::Unsupported(
            "expected a PDF or UTF-8 text file".to_string(),
        )),
    }
}

/// Collapse extraction artifacts: trim every line and keep at most one
/// blank line between paragraphs.
pub(crate) fn clean_text(text: &str) -> String {
    text.lines()
        .map(|l| l.trim().trim_matches('\u{c}'))
        .fold(Vec::new(), |mut acc: Vec<&str>, line| {
            if line.is_empty() {
                if acc.last().map(|l| !l.is_empty()).unwrap_or(false) {
                    acc.push("");
                }
            } else {
                acc.push(line);
            }
            acc
        })
        .join("\n")
        .trim()
        .to_string()
}
