//! Word-level diff between a source text and its rewrite
//!
//! This module answers two questions about a rewrite: which of its words are
//! new, and which stretch of it was carried over from the source. It also
//! renders the rewrite with those words highlighted.

pub mod formatter;
pub mod words;

pub use formatter::{DiffFormatter, HighlightFormat, MarkedWord, WordMark};
pub use words::{change_ratio, find_text_differences, TextDiff};

/// Convenience function to diff two texts and render the rewrite with highlights
pub fn highlight_changes(original: &str, updated: &str, format: HighlightFormat) -> String {
    let diff = find_text_differences(original, updated);
    DiffFormatter::format(updated, &diff, format)
}
