//! Report tying a rewrite to its source text
//!
//! Bundles the rewrite with statistics for both texts and the word diff, for
//! display or JSON export.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::TextStats;
use crate::diff::{change_ratio, find_text_differences, DiffFormatter, HighlightFormat, TextDiff};
use crate::paraphrase::{strip_invisible, Style};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeReport {
    /// Style tag the rewrite was produced with, if any
    pub style: Option<String>,
    pub original: String,
    pub output: String,
    pub original_stats: TextStats,
    pub output_stats: TextStats,
    pub diff: TextDiff,
    /// Word-level similarity in `[0, 1]`
    pub similarity: f32,
    pub generated_at: DateTime<Utc>,
}

impl HumanizeReport {
    /// Build a report. Invisible markers are removed before comparing, so
    /// statistics and highlights reflect the visible text.
    pub fn new(original: &str, output: &str, style: Option<&str>) -> Self {
        let visible = strip_invisible(output);
        let diff = find_text_differences(original, &visible);

        Self {
            style: style.map(str::to_string),
            original: original.to_string(),
            output: output.to_string(),
            original_stats: TextStats::of(original),
            output_stats: TextStats::of(&visible),
            similarity: change_ratio(original, &visible),
            diff,
            generated_at: Utc::now(),
        }
    }

    pub fn highlighted(&self, color: bool) -> String {
        let format = if color { HighlightFormat::Ansi } else { HighlightFormat::Bracketed };
        DiffFormatter::format(&strip_invisible(&self.output), &self.diff, format)
    }

    pub fn summary(&self) -> String {
        DiffFormatter::format_summary(&self.diff, self.similarity)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn stats_line(label: &str, stats: &TextStats) -> String {
    format!(
        "{:<8} {:>6} chars {:>5} words {:>4} sentences {:>3} paragraphs",
        label, stats.characters, stats.words, stats.sentences, stats.paragraphs
    )
}

impl HumanizeReport {
    /// Multi-line human readable rendering
    pub fn render_text(&self, color: bool) -> String {
        let mut lines = Vec::new();
        lines.push(self.highlighted(color));
        lines.push(String::new());
        lines.push(stats_line("Input", &self.original_stats));
        lines.push(stats_line("Output", &self.output_stats));
        lines.push(format!(
            "Word change: {:+}",
            self.original_stats.word_delta(&self.output_stats)
        ));
        if let Some(style) = self.style.as_deref().and_then(Style::parse) {
            lines.push(format!("Style: {} ({})", style, style.description()));
        }
        lines.push(self.summary());
        lines.push(DiffFormatter::legend(color));
        lines.join("\n")
    }
}
