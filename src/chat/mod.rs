//! Chat transcript state for interactive clients
//!
//! Messages live only in memory. While a question is in flight the
//! transcript ends with a single typing-indicator entry, which is replaced by
//! the answer or by an error bubble.

mod message;
mod session;

pub use message::{Message, TYPING_INDICATOR_ID};
pub use session::{ChatSession, Submission};

/// Content of the typing indicator
pub const TYPING_TEXT: &str = "🤔 Analyzing your question...";

/// Reply to a question asked before any document was uploaded
pub const NO_DOCUMENT_TEXT: &str =
    "📄 Please upload a document first to start analyzing your medical content.";

/// Starter questions offered once a document is loaded
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What are the main findings in this document?",
    "Summarize the key medical information",
    "What are the recommended treatments?",
    "Are there any important warnings or side effects?",
    "What tests or procedures are mentioned?",
    "Explain the diagnosis in simple terms",
    "What medications are prescribed?",
    "Are there any lifestyle recommendations?",
];
