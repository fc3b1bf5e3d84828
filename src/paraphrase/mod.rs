//! Rule-based paraphrase engine
//!
//! Rewrites text in one of a fixed set of [`Style`]s using static phrase
//! substitution tables, optional sentence starters, interior sentence
//! shuffling, and cosmetic punctuation and whitespace perturbation.
//!
//! Output is intentionally **not** deterministic: the same text and style
//! produce different results on every call. Pass a seeded generator to
//! [`Paraphraser::paraphrase_with_rng`] to pin the outcome in tests.

pub mod perturb;
pub mod tables;

pub use perturb::{obfuscate_word, split_sentences, strip_invisible, INVISIBLE_MARKER};
pub use tables::Style;

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Captures;

use crate::config::ParaphraseConfig;
use perturb::{
    add_random_whitespace, capitalize_first, lowercase_first, shuffle_interior, vary_punctuation,
};

/// Paraphrase engine with tunable perturbation probabilities
#[derive(Debug, Clone, Default)]
pub struct Paraphraser {
    config: ParaphraseConfig,
}

impl Paraphraser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParaphraseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParaphraseConfig {
        &self.config
    }

    /// Paraphrase using the thread-local random source
    pub fn paraphrase(&self, text: &str, style: Style) -> String {
        self.paraphrase_with_rng(text, style, &mut rand::rng())
    }

    /// Paraphrase for a free-form style tag. Unknown tags return `text` unchanged.
    pub fn paraphrase_tagged(&self, text: &str, tag: &str) -> String {
        match Style::parse(tag) {
            Some(style) => self.paraphrase(text, style),
            None => {
                tracing::debug!("Unknown style tag {:?}, leaving text as is", tag);
                text.to_string()
            }
        }
    }

    pub fn paraphrase_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        style: Style,
        rng: &mut R,
    ) -> String {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return text.to_string();
        }

        let mut rewritten: Vec<String> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| self.rewrite_sentence(sentence, index, style, &mut *rng))
            .collect();

        shuffle_interior(&mut rewritten, rng);

        let joined = rewritten.join(" ");
        let spaced = add_random_whitespace(&joined, &self.config, rng);
        let result = vary_punctuation(&spaced, &self.config, rng);

        tracing::trace!(
            style = %style,
            sentences = rewritten.len(),
            "paraphrased {} chars into {}",
            text.len(),
            result.len()
        );

        result
    }

    fn rewrite_sentence<R: Rng + ?Sized>(
        &self,
        sentence: &str,
        index: usize,
        style: Style,
        rng: &mut R,
    ) -> String {
        let words: Vec<String> = sentence
            .split_whitespace()
            .map(|word| {
                if rng.random::<f64>() < self.config.obfuscate_word_probability {
                    obfuscate_word(word)
                } else {
                    word.to_string()
                }
            })
            .collect();

        let mut processed = words.join(" ");

        for trigger in style.triggers() {
            if !trigger.pattern.is_match(&processed) {
                continue;
            }
            processed = trigger
                .pattern
                .replace_all(&processed, |_: &Captures| {
                    trigger.candidates.choose(&mut *rng).copied().unwrap_or(trigger.phrase)
                })
                .into_owned();
        }

        if index > 0 && rng.random::<f64>() < self.config.starter_probability {
            if let Some(starter) = style.starters().choose(rng) {
                processed = format!("{} {}", starter, lowercase_first(&processed));
            }
        }

        capitalize_first(&processed)
    }
}

/// Paraphrase `text` in `style` with the default probabilities
pub fn paraphrase(text: &str, style: Style) -> String {
    Paraphraser::default().paraphrase(text, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiet_config() -> ParaphraseConfig {
        ParaphraseConfig {
            obfuscate_word_probability: 0.0,
            starter_probability: 0.0,
            zero_width_probability: 0.0,
            exclaim_threshold: 1.0,
            long_ellipsis_threshold: 1.0,
            ellipsis_threshold: 1.0,
            semicolon_threshold: 1.0,
            dash_threshold: 1.0,
        }
    }

    #[test]
    fn test_empty_input() {
        let paraphraser = Paraphraser::new();
        for style in Style::all() {
            assert_eq!(paraphraser.paraphrase("", *style), "");
        }
    }

    #[test]
    fn test_unknown_tag_is_identity() {
        let paraphraser = Paraphraser::new();
        let text = "I think this is a good idea. But it has a problem.";
        assert_eq!(paraphraser.paraphrase_tagged(text, "ultra"), text);
        assert_eq!(paraphraser.paraphrase_tagged(text, ""), text);
    }

    #[test]
    fn test_quiet_config_only_substitutes() {
        let paraphraser = Paraphraser::with_config(quiet_config());
        let mut rng = StdRng::seed_from_u64(42);

        let out = paraphraser.paraphrase_with_rng("The  team   will start.", Style::Professional, &mut rng);

        assert!(!out.contains("team"));
        assert!(!out.contains("start"));
        assert!(out.ends_with('.'));
        assert!(!out.contains("  "));
        assert!(out.starts_with("The "));
    }

    #[test]
    fn test_replacement_at_sentence_start_is_capitalized() {
        let paraphraser = Paraphraser::with_config(quiet_config());
        let mut rng = StdRng::seed_from_u64(1);

        let out = paraphraser.paraphrase_with_rng("but why?", Style::Academic, &mut rng);
        let first = out.chars().next().unwrap();

        assert!(first.is_uppercase());
        assert!(out.ends_with("why?"));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let paraphraser = Paraphraser::new();
        let text = "I think the plan is good. It shows many things. We talk a lot. The end is near.";

        let a = paraphraser.paraphrase_with_rng(text, Style::Academic, &mut StdRng::seed_from_u64(9));
        let b = paraphraser.paraphrase_with_rng(text, Style::Academic, &mut StdRng::seed_from_u64(9));

        assert_eq!(a, b);
    }

    #[test]
    fn test_starter_is_never_added_to_first_sentence() {
        let config = ParaphraseConfig {
            starter_probability: 1.0,
            ..quiet_config()
        };
        let paraphraser = Paraphraser::with_config(config);
        let mut rng = StdRng::seed_from_u64(4);

        let out = paraphraser.paraphrase_with_rng("Alpha rises. Beta falls.", Style::Casual, &mut rng);

        assert!(out.starts_with("Alpha rises."));
        let second = &out["Alpha rises. ".len()..];
        assert!(Style::Casual.starters().iter().any(|s| second.starts_with(s)));
        assert!(second.ends_with("beta falls."));
    }

    #[test]
    fn test_obfuscated_words_keep_visible_text() {
        let config = ParaphraseConfig {
            obfuscate_word_probability: 1.0,
            ..quiet_config()
        };
        let paraphraser = Paraphraser::with_config(config);
        let mut rng = StdRng::seed_from_u64(8);

        let out = paraphraser.paraphrase_with_rng("Walk quietly home.", Style::Creative, &mut rng);

        assert!(out.contains(INVISIBLE_MARKER));
        // fully marked words no longer match any trigger
        assert_eq!(strip_invisible(&out), "Walk quietly home.");
    }
}
