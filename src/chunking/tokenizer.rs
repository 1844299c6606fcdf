//! Simple tokenization utilities

use unicode_segmentation::UnicodeSegmentation;

/// Word tokenizer used for token estimates and feature hashing
pub struct SimpleTokenizer;

impl SimpleTokenizer {
    /// Count tokens in text (word-based approximation)
    pub fn count_tokens(text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Lowercased unicode words
    pub fn normalized_tokens(text: &str) -> Vec<String> {
        text.unicode_words().map(|w| w.to_lowercase()).collect()
    }

    /// Adjacent word pairs (`"a b"`), used as extra hashing features
    pub fn bigrams(tokens: &[String]) -> Vec<String> {
        tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])).collect()
    }
}
