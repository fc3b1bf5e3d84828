use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::config::HumanizerConfig;

#[derive(Parser)]
#[command(name = "humanize")]
#[command(author = "Humanize Kit Team")]
#[command(version = "0.2.0")]
#[command(about = "Rewrite text in a chosen style and highlight what changed")]
#[command(long_about = "Humanize rewrites text with a rule-based paraphraser (phrase substitution, sentence starters, sentence reordering, punctuation variation) and shows which words are new and which stretch of the original survived.")]
pub struct Cli {
    /// Text to rewrite
    #[arg(value_name = "TEXT", help = "Text to rewrite (reads --input or stdin when omitted)")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "text")]
    pub input: Option<PathBuf>,

    /// Writing style, falls back to `service.default_style` from the config
    #[arg(short, long, help = "Style: academic, casual, professional, creative")]
    pub style: Option<String>,

    /// Seed for reproducible output
    #[arg(long, help = "Seed the random source for reproducible output")]
    pub seed: Option<u64>,

    /// Compare against an existing rewrite instead of paraphrasing
    #[arg(long, value_name = "FILE", help = "Diff the input against this rewrite instead of paraphrasing")]
    pub compare: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text", help = "Output format")]
    pub output: OutputFormat,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Disable colors in output
    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Highlighted rewrite with statistics (default)
    Text,
    /// JSON report for scripting
    Json,
    /// Rewrite only
    Compact,
}

impl Cli {
    /// Resolve the input text from the argument, the input file, or stdin
    pub fn read_input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.input {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()));
        }

        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read text from stdin")?;
        Ok(buffer)
    }

    pub fn read_comparison(&self) -> Result<Option<String>> {
        match &self.compare {
            Some(path) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read comparison file {}", path.display())),
            None => Ok(None),
        }
    }

    /// Configuration from `--config` (or defaults) with environment overrides
    pub fn load_config(&self) -> Result<HumanizerConfig> {
        let config = match &self.config {
            Some(path) => HumanizerConfig::load(path)?,
            None => HumanizerConfig::default(),
        };

        let config = config.with_env_overrides();
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Style tag for this run: `--style` wins over the configured default
    pub fn resolve_style<'a>(&'a self, config: &'a HumanizerConfig) -> &'a str {
        self.style.as_deref().unwrap_or(&config.service.default_style)
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.input {
            if !path.is_file() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
        }

        if let Some(path) = &self.compare {
            if !path.is_file() {
                return Err(format!("Comparison file does not exist: {}", path.display()));
            }
        }

        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(format!("Config file does not exist: {}", path.display()));
            }
        }

        Ok(())
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            text: None,
            input: None,
            style: None,
            seed: None,
            compare: None,
            output: OutputFormat::Text,
            config: None,
            verbose: false,
            no_color: false,
        }
    }
}
