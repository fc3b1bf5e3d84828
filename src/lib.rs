pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod paraphrase;
pub mod report;
pub mod service;

pub use config::*;
pub use diff::{find_text_differences, TextDiff};
pub use paraphrase::{paraphrase, Paraphraser, Style};
pub use report::HumanizeReport;
pub use service::{HumanizeError, HumanizeService, Humanizer, RuleBasedHumanizer};
