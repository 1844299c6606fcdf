//! Document chunking
//!
//! Features:
//! - Separator-based splitting measured in characters
//! - Greedy merging up to a target chunk size with overlap
//! - Word tokenization shared with the offline embedding backend

mod splitter;
mod tokenizer;

pub use splitter::*;
pub use tokenizer::*;
