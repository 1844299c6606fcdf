//! Separator-based text splitting with overlap

use std::collections::VecDeque;

use super::SimpleTokenizer;
use crate::config::ChunkingConfig;
use crate::types::{Chunk, Document};
use tracing::{debug, warn};

/// Splits text on a separator, then greedily merges the pieces back into
/// chunks of at most `chunk_size` characters, carrying up to
/// `chunk_overlap` characters of trailing pieces into the next chunk.
///
/// A single piece longer than `chunk_size` becomes its own oversized chunk;
/// pieces are never cut.
pub struct CharacterSplitter {
    config: ChunkingConfig,
}

impl CharacterSplitter {
    /// Create a new splitter
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    /// Split a document into indexed chunks
    pub fn split_document(&self, document: &Document) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self
            .split_text(&document.content)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(&document.id, i, text))
            .collect();

        debug!(
            "Split document {} (~{} words) into {} chunks",
            document.id,
            SimpleTokenizer::count_tokens(&document.content),
            chunks.len()
        );

        chunks
    }

    /// Split raw text into chunk strings
    pub fn split_text(&self, text: &str) -> Vec<String> {
        let separator = self.config.separator.as_str();
        let pieces: Vec<&str> = text.split(separator).filter(|s| !s.is_empty()).collect();
        self.merge_pieces(&pieces, separator)
    }

    fn merge_pieces(&self, pieces: &[&str], separator: &str) -> Vec<String> {
        let chunk_size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;
        let sep_len = separator.chars().count();

        let mut chunks = Vec::new();
        let mut current: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0usize;

        for &piece in pieces {
            let len = piece.chars().count();
            let joined_len = |current: &VecDeque<(&str, usize)>, total: usize| {
                total + len + if current.is_empty() { 0 } else { sep_len }
            };

            if joined_len(&current, total) > chunk_size {
                if total > chunk_size {
                    warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total, chunk_size
                    );
                }
                if !current.is_empty() {
                    if let Some(chunk) = Self::join(&current, separator) {
                        chunks.push(chunk);
                    }
                    // Drop leading pieces until what remains fits as overlap
                    while total > overlap
                        || (joined_len(&current, total) > chunk_size && total > 0)
                    {
                        let Some((_, first_len)) = current.pop_front() else {
                            break;
                        };
                        total -= first_len + if current.is_empty() { 0 } else { sep_len };
                    }
                }
            }

            current.push_back((piece, len));
            total += len + if current.len() > 1 { sep_len } else { 0 };
        }

        if let Some(chunk) = Self::join(&current, separator) {
            chunks.push(chunk);
        }

        chunks
    }

    fn join(pieces: &VecDeque<(&str, usize)>, separator: &str) -> Option<String> {
        let joined = pieces
            .iter()
            .map(|(p, _)| *p)
            .collect::<Vec<_>>()
            .join(separator);
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> CharacterSplitter {
        CharacterSplitter::new(ChunkingConfig {
            separator: "\n".to_string(),
            chunk_size,
            chunk_overlap,
        })
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = splitter(1000, 200).split_text("A short document.");
        assert_eq!(chunks, vec!["A short document.".to_string()]);
    }

    #[test]
    fn test_empty_text_produces_no_chunks() {
        assert!(splitter(1000, 200).split_text("").is_empty());
        assert!(splitter(1000, 200).split_text("\n\n\n").is_empty());
    }

    #[test]
    fn test_merges_lines_up_to_chunk_size() {
        let chunks = splitter(7, 0).split_text("aaa\nbbb\nccc\nddd");
        assert_eq!(chunks, vec!["aaa\nbbb", "ccc\nddd"]);
    }

    #[test]
    fn test_overlap_carries_trailing_lines() {
        let chunks = splitter(11, 3).split_text("aaa\nbbb\nccc\nddd\neee");
        assert_eq!(chunks, vec!["aaa\nbbb\nccc", "ccc\nddd\neee"]);
    }

    #[test]
    fn test_overlap_larger_than_single_line_keeps_several() {
        let chunks = splitter(11, 7).split_text("aaa\nbbb\nccc\nddd");
        assert_eq!(chunks, vec!["aaa\nbbb\nccc", "bbb\nccc\nddd"]);
    }

    #[test]
    fn test_oversized_line_is_not_cut() {
        let long = "x".repeat(25);
        let text = format!("aa\n{}\nbb", long);
        let chunks = splitter(10, 2).split_text(&text);
        assert_eq!(chunks, vec!["aa".to_string(), long, "bb".to_string()]);
    }

    #[test]
    fn test_chunks_respect_size_when_lines_fit() {
        let text = (0..200)
            .map(|i| format!("Line number {} of the clinical notes.", i))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = splitter(1000, 200).split_text(&text);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000);
        }
        // the next chunk repeats the previous chunk's last line
        let first_tail = chunks[0].lines().last().unwrap();
        assert!(chunks[1].lines().any(|l| l == first_tail));
    }

    #[test]
    fn test_lengths_counted_in_chars() {
        // 6 chars, 18 bytes each
        let chunks = splitter(13, 0).split_text("हिन्दी\nहिन्दी\nहिन्दी");
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn test_split_document_assigns_ids_and_indices() {
        let doc = Document::new("aaa\nbbb\nccc\nddd").with_id("doc");
        let chunks = splitter(7, 0).split_document(&doc);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "doc_0");
        assert_eq!(chunks[1].id, "doc_1");
        assert_eq!(chunks[1].index, 1);
        assert!(chunks.iter().all(|c| c.document_id == "doc"));
    }

    #[test]
    fn test_custom_separator() {
        let s = CharacterSplitter::new(ChunkingConfig {
            separator: "\n\n".to_string(),
            chunk_size: 12,
            chunk_overlap: 0,
        });
        let chunks = s.split_text("para one\n\npara two\n\npara three");
        assert_eq!(chunks, vec!["para one", "para two", "para three"]);
    }
}
