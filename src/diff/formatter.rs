use serde::Serialize;

use super::words::TextDiff;

/// Highlight classification of a single output word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WordMark {
    /// Word does not occur in the source text
    pub added: bool,
    /// Word lies inside the longest unchanged run
    pub unchanged: bool,
}

/// An output word together with its highlight marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedWord<'a> {
    pub word: &'a str,
    pub mark: WordMark,
}

/// Different renderings of a highlighted rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightFormat {
    /// ANSI colors: added words orange, unchanged run blue
    Ansi,
    /// Plain text with `[+word]` and `{word}` markers
    Bracketed,
}

/// Formats a rewrite with its diff highlights
pub struct DiffFormatter;

impl DiffFormatter {
    /// Split `output` on single spaces and classify each word against `diff`
    pub fn mark_words<'a>(output: &'a str, diff: &TextDiff) -> Vec<MarkedWord<'a>> {
        output
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(|word| MarkedWord {
                word,
                mark: WordMark {
                    added: diff.is_added(word),
                    unchanged: diff.is_in_longest_unchanged(word),
                },
            })
            .collect()
    }

    pub fn format(output: &str, diff: &TextDiff, format: HighlightFormat) -> String {
        match format {
            HighlightFormat::Ansi => Self::format_ansi(output, diff),
            HighlightFormat::Bracketed => Self::format_bracketed(output, diff),
        }
    }

    pub fn format_ansi(output: &str, diff: &TextDiff) -> String {
        Self::mark_words(output, diff)
            .iter()
            .map(|marked| match (marked.mark.added, marked.mark.unchanged) {
                (true, _) => format!("\x1b[38;5;208m{}\x1b[0m", marked.word),
                (false, true) => format!("\x1b[34m{}\x1b[0m", marked.word),
                (false, false) => marked.word.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn format_bracketed(output: &str, diff: &TextDiff) -> String {
        Self::mark_words(output, diff)
            .iter()
            .map(|marked| match (marked.mark.added, marked.mark.unchanged) {
                (true, _) => format!("[+{}]", marked.word),
                (false, true) => format!("{{{}}}", marked.word),
                (false, false) => marked.word.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One-line summary, e.g. `3 added words, longest unchanged: "the cat" (62% similar)`
    pub fn format_summary(diff: &TextDiff, ratio: f32) -> String {
        format!(
            "{} added word{}, longest unchanged: {:?} ({:.0}% similar)",
            diff.added_words.len(),
            if diff.added_words.len() == 1 { "" } else { "s" },
            diff.longest_unchanged_part,
            ratio * 100.0
        )
    }

    pub fn legend(color: bool) -> String {
        if color {
            "\x1b[38;5;208m●\x1b[0m added change   \x1b[34m●\x1b[0m longest unedited part".to_string()
        } else {
            "[+word] added change   {word} longest unedited part".to_string()
        }
    }
}
