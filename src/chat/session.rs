use super::message::Message;
use super::NO_DOCUMENT_TEXT;
use crate::languages::{self, Language};

/// What the caller should do after a question is submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send the question for this document; the typing indicator is showing
    Send { document_id: String },
    /// No document is loaded; the transcript already explains why
    NoDocument,
}

/// Transcript plus the document and language it is scoped to
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    document_id: Option<String>,
    filename: Option<String>,
    language: &'static Language,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            document_id: None,
            filename: None,
            language: languages::default_language(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn language(&self) -> &'static Language {
        self.language
    }

    /// Select the answer language (names, codes and aliases accepted)
    pub fn set_language(&mut self, input: &str) -> &'static Language {
        self.language = languages::resolve(input);
        self.language
    }

    pub fn is_pending(&self) -> bool {
        self.messages.iter().any(Message::is_typing_indicator)
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Show the typing indicator; never more than one at a time
    pub fn begin_pending(&mut self) {
        self.clear_pending();
        self.messages.push(Message::typing_indicator());
    }

    /// Replace the typing indicator with the answer
    pub fn resolve(&mut self, answer: impl Into<String>) {
        self.clear_pending();
        self.messages.push(Message::assistant(answer));
    }

    /// Replace the typing indicator with an error bubble
    pub fn fail(&mut self, error: &str) {
        self.clear_pending();
        self.messages.push(Message::assistant(format!(
            "❌ Error: {}. Please try again.",
            error
        )));
    }

    /// Record a question and decide whether it can be sent.
    ///
    /// Without a document the user message is followed by a hint and nothing
    /// is sent. Otherwise the typing indicator is shown.
    pub fn submit(&mut self, question: impl Into<String>) -> Submission {
        self.push_user(question);
        match self.document_id.clone() {
            Some(document_id) => {
                self.begin_pending();
                Submission::Send { document_id }
            }
            None => {
                self.messages.push(Message::assistant(NO_DOCUMENT_TEXT));
                Submission::NoDocument
            }
        }
    }

    /// Start a new transcript for a freshly processed document
    pub fn document_loaded(&mut self, filename: &str, document_id: impl Into<String>) {
        self.messages.clear();
        self.document_id = Some(document_id.into());
        self.filename = Some(filename.to_string());
        self.messages.push(Message::assistant(format!(
            "✨ Document \"{}\" has been successfully processed and is ready for analysis. \
             Ask me anything about your medical document!",
            filename
        )));
    }

    /// Start a new transcript after a failed upload, forgetting any document
    pub fn document_failed(&mut self, error: &str) {
        self.messages.clear();
        self.document_id = None;
        self.filename = None;
        self.messages.push(Message::assistant(format!(
            "❌ Error processing document: {}. Please try again.",
            error
        )));
    }

    fn clear_pending(&mut self) {
        self.messages.retain(|m| !m.is_typing_indicator());
    }
}
