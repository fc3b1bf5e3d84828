//! Sentence splitting, reordering, and cosmetic perturbation passes

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use crate::config::ParaphraseConfig;

/// Zero-width space used as the invisible marker
pub const INVISIBLE_MARKER: char = '\u{200B}';

static SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid")
});

/// Split text into sentences: runs of non-terminators followed by one or
/// more of `.`, `!`, `?`. A trailing fragment without a terminator becomes
/// its own final sentence. Blank pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut consumed = 0;

    for found in SENTENCE.find_iter(text) {
        if !text[consumed..found.start()].trim().is_empty() {
            sentences.push(&text[consumed..found.start()]);
        }
        sentences.push(found.as_str());
        consumed = found.end();
    }

    let tail = &text[consumed..];
    if !tail.trim().is_empty() {
        sentences.push(tail);
    }

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

/// Interleave the invisible marker between every character of `word`
pub fn obfuscate_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 4);
    for (i, ch) in word.chars().enumerate() {
        if i > 0 {
            out.push(INVISIBLE_MARKER);
        }
        out.push(ch);
    }
    out
}

/// Remove every invisible marker, recovering the visible text
pub fn strip_invisible(text: &str) -> String {
    text.chars().filter(|&c| c != INVISIBLE_MARKER).collect()
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shuffle every sentence except the first and the last.
/// Two or fewer sentences are left in order.
pub fn shuffle_interior<T, R: Rng + ?Sized>(sentences: &mut [T], rng: &mut R) {
    if sentences.len() <= 2 {
        return;
    }
    let last = sentences.len() - 1;
    sentences[1..last].shuffle(rng);
}

/// Append an invisible marker to words with the configured probability
pub fn add_random_whitespace<R: Rng + ?Sized>(
    text: &str,
    config: &ParaphraseConfig,
    rng: &mut R,
) -> String {
    text.split(' ')
        .map(|word| {
            if rng.random::<f64>() < config.zero_width_probability {
                format!("{}{}", word, INVISIBLE_MARKER)
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Randomly stretch periods and soften commas.
///
/// Every occurrence draws its own number in `[0, 1)` and the thresholds are
/// checked from the highest down.
pub fn vary_punctuation<R: Rng + ?Sized>(
    text: &str,
    config: &ParaphraseConfig,
    rng: &mut R,
) -> String {
    let mut out = String::with_capacity(text.len() + 16);

    for ch in text.chars() {
        match ch {
            '.' => {
                let roll = rng.random::<f64>();
                if roll > config.exclaim_threshold {
                    out.push_str("!!");
                } else if roll > config.long_ellipsis_threshold {
                    out.push_str("....");
                } else if roll > config.ellipsis_threshold {
                    out.push_str("...");
                } else {
                    out.push('.');
                }
            }
            ',' => {
                let roll = rng.random::<f64>();
                if roll > config.semicolon_threshold {
                    out.push(';');
                } else if roll > config.dash_threshold {
                    out.push_str(" \u{2014},");
                } else {
                    out.push(',');
                }
            }
            other => out.push(other),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_split_sentences() {
        assert_eq!(
            split_sentences("One. Two! Three?"),
            vec!["One.", " Two!", " Three?"]
        );
        assert_eq!(split_sentences("Wait... what?!"), vec!["Wait...", " what?!"]);
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn test_split_keeps_trailing_fragment() {
        assert_eq!(
            split_sentences("First one. and a tail"),
            vec!["First one.", " and a tail"]
        );
        assert_eq!(split_sentences("no terminator"), vec!["no terminator"]);
    }

    #[test]
    fn test_obfuscation_is_reversible() {
        let marked = obfuscate_word("héllo");
        assert_eq!(marked.chars().filter(|&c| c == INVISIBLE_MARKER).count(), 4);
        assert_eq!(strip_invisible(&marked), "héllo");
        assert_eq!(obfuscate_word(""), "");
        assert_eq!(obfuscate_word("a"), "a");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize_first("hello world"), "Hello world");
        assert_eq!(capitalize_first("élan"), "Élan");
        assert_eq!(lowercase_first("Hello"), "hello");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_shuffle_keeps_ends() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut sentences = vec!["a", "b", "c", "d", "e", "f"];
            shuffle_interior(&mut sentences, &mut rng);
            assert_eq!(sentences[0], "a");
            assert_eq!(sentences[5], "f");
            let mut middle = sentences[1..5].to_vec();
            middle.sort();
            assert_eq!(middle, vec!["b", "c", "d", "e"]);
        }

        let mut pair = vec!["x", "y"];
        shuffle_interior(&mut pair, &mut rng);
        assert_eq!(pair, vec!["x", "y"]);
    }

    #[test]
    fn test_whitespace_pass_preserves_visible_text() {
        let config = ParaphraseConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let text = "the quick brown fox jumps over the lazy dog";

        for _ in 0..20 {
            let out = add_random_whitespace(text, &config, &mut rng);
            assert_eq!(strip_invisible(&out), text);
        }
    }

    #[test]
    fn test_punctuation_disabled_is_identity() {
        let config = ParaphraseConfig {
            exclaim_threshold: 1.0,
            long_ellipsis_threshold: 1.0,
            ellipsis_threshold: 1.0,
            semicolon_threshold: 1.0,
            dash_threshold: 1.0,
            ..ParaphraseConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let text = "Yes, no. Maybe, later.";
        assert_eq!(vary_punctuation(text, &config, &mut rng), text);
    }

    #[test]
    fn test_punctuation_variants_appear() {
        let config = ParaphraseConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let text = ". ".repeat(400) + &", ".repeat(400);
        let out = vary_punctuation(&text, &config, &mut rng);

        assert!(out.contains("!!"));
        assert!(out.contains("...."));
        assert!(out.contains(';'));
        assert!(out.contains(" \u{2014},"));
    }
}
