//! Text statistics shown next to the input and the rewrite

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").expect("valid pattern"));
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid pattern"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub characters: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: word_count(text),
            sentences: count_nonblank(SENTENCE_BREAK.split(text)),
            paragraphs: count_nonblank(PARAGRAPH_BREAK.split(text)),
        }
    }

    pub fn word_delta(&self, other: &TextStats) -> isize {
        other.words as isize - self.words as isize
    }
}

fn count_nonblank<'a>(pieces: impl Iterator<Item = &'a str>) -> usize {
    pieces.filter(|piece| !piece.trim().is_empty()).count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
