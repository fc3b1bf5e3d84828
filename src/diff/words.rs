use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use similar::TextDiff as WordDiff;

/// Word-level comparison of a rewrite against its source text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDiff {
    /// Lower-cased words of the rewrite that never occur in the source
    pub added_words: BTreeSet<String>,
    /// Longest run of rewrite words each found somewhere in the source
    pub longest_unchanged_part: String,
}

impl TextDiff {
    pub fn is_added(&self, word: &str) -> bool {
        self.added_words.contains(&word.to_lowercase())
    }

    pub fn is_in_longest_unchanged(&self, word: &str) -> bool {
        !word.is_empty()
            && self
                .longest_unchanged_part
                .to_lowercase()
                .contains(&word.to_lowercase())
    }
}

/// Compare `updated` against `original` word by word, ignoring case.
///
/// A word of `updated` is *added* when no whitespace token of `original`
/// equals it. The longest unchanged part is the longest run (in characters)
/// of consecutive `updated` words that each appear as a substring anywhere
/// in `original`; the first of equally long runs wins.
///
/// The substring test is looser than whole-word matching: a short token
/// such as `a` matches almost any source. An empty source marks nothing as
/// unchanged.
pub fn find_text_differences(original: &str, updated: &str) -> TextDiff {
    let original_lower = original.to_lowercase();
    let original_words: HashSet<&str> = original_lower.split_whitespace().collect();

    let added_words = updated
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !original_words.contains(word.as_str()))
        .collect();

    let mut longest = String::new();
    let mut longest_chars = 0;
    let mut current = String::new();
    let mut current_chars = 0;

    for word in updated.split_whitespace() {
        let unchanged = !original_words.is_empty() && original_lower.contains(&word.to_lowercase());

        if unchanged {
            if !current.is_empty() {
                current.push(' ');
                current_chars += 1;
            }
            current.push_str(word);
            current_chars += word.chars().count();

            if current_chars > longest_chars {
                longest.clone_from(&current);
                longest_chars = current_chars;
            }
        } else {
            current.clear();
            current_chars = 0;
        }
    }

    TextDiff {
        added_words,
        longest_unchanged_part: longest,
    }
}

/// Word-level similarity of the two texts in `[0, 1]`, where `1.0` means
/// identical token sequences
pub fn change_ratio(original: &str, updated: &str) -> f32 {
    WordDiff::from_words(original, updated).ratio()
}
