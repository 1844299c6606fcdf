use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Reserved id of the "assistant is typing" placeholder
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";

static NEXT_MESSAGE_SEQ: AtomicU64 = AtomicU64::new(1);

/// One bubble in the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn with_id(id: String, content: impl Into<String>, is_user: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            is_user,
            timestamp,
        }
    }

    fn fresh(content: impl Into<String>, is_user: bool) -> Self {
        let timestamp = Utc::now();
        let seq = NEXT_MESSAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{}", timestamp.timestamp_millis(), seq);
        Self::with_id(id, content, is_user, timestamp)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::fresh(content, true)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::fresh(content, false)
    }

    /// The placeholder shown while waiting for an answer
    pub fn typing_indicator() -> Self {
        Self::with_id(
            TYPING_INDICATOR_ID.to_string(),
            super::TYPING_TEXT,
            false,
            Utc::now(),
        )
    }

    pub fn is_typing_indicator(&self) -> bool {
        self.id == TYPING_INDICATOR_ID
    }
}
