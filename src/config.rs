//! Configuration management for the humanizer
//!
//! This module provides configuration structures and defaults for the
//! paraphrase engine, the usage quota, and the request handler. Values can
//! come from a TOML file, from `HUMANIZER_*` environment variables, or from
//! the built-in defaults.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanizerConfig {
    /// Paraphrase engine probabilities
    pub paraphrase: ParaphraseConfig,
    /// Per-user generation limits
    pub usage: UsageConfig,
    /// Request handling
    pub service: ServiceConfig,
}

/// Probabilities and thresholds for the paraphrase engine.
///
/// `*_probability` fields are chances in `[0, 1]`. `*_threshold` fields are
/// compared against a uniform draw per punctuation mark; a draw above the
/// threshold triggers the variant, so `1.0` disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParaphraseConfig {
    /// Chance a word gets invisible markers between its characters
    pub obfuscate_word_probability: f64,
    /// Chance a non-initial sentence gets a starter phrase
    pub starter_probability: f64,
    /// Chance an invisible marker is appended after a word
    pub zero_width_probability: f64,
    /// Period becomes "!!"
    pub exclaim_threshold: f64,
    /// Period becomes "...."
    pub long_ellipsis_threshold: f64,
    /// Period becomes "..."
    pub ellipsis_threshold: f64,
    /// Comma becomes ";"
    pub semicolon_threshold: f64,
    /// Comma gets a long dash in front
    pub dash_threshold: f64,
}

/// Configuration for generation quotas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Generations allowed per user, -1 for unlimited
    pub default_limit: i64,
    /// Per-email overrides, -1 for unlimited
    pub special_users: HashMap<String, i64>,
}

/// Configuration for the request handler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Reject requests without an identity
    pub require_auth: bool,
    /// Style used when a request names none
    pub default_style: String,
    /// Longest accepted input, in characters
    pub max_input_chars: usize,
}

impl Default for ParaphraseConfig {
    fn default() -> Self {
        Self {
            obfuscate_word_probability: 0.1,
            starter_probability: 0.2,
            zero_width_probability: 0.1,
            exclaim_threshold: 0.95,
            long_ellipsis_threshold: 0.9,
            ellipsis_threshold: 0.7,
            semicolon_threshold: 0.9,
            dash_threshold: 0.8,
        }
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            default_limit: 7,
            special_users: HashMap::new(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            require_auth: false,
            default_style: "casual".to_string(),
            max_input_chars: 20_000,
        }
    }
}

impl ParaphraseConfig {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("obfuscate_word_probability", self.obfuscate_word_probability),
            ("starter_probability", self.starter_probability),
            ("zero_width_probability", self.zero_width_probability),
            ("exclaim_threshold", self.exclaim_threshold),
            ("long_ellipsis_threshold", self.long_ellipsis_threshold),
            ("ellipsis_threshold", self.ellipsis_threshold),
            ("semicolon_threshold", self.semicolon_threshold),
            ("dash_threshold", self.dash_threshold),
        ];

        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be between 0.0 and 1.0", name));
            }
        }

        Ok(())
    }
}

impl UsageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_limit < -1 {
            return Err("default_limit must be -1 (unlimited) or at least 0".to_string());
        }

        for (email, limit) in &self.special_users {
            if *limit < -1 {
                return Err(format!("limit for {} must be -1 (unlimited) or at least 0", email));
            }
        }

        Ok(())
    }
}

impl HumanizerConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// is missing or unreadable
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring config {}: {:#}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Apply overrides from environment variables
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("HUMANIZER_DEFAULT_LIMIT") {
            if let Ok(limit) = val.parse::<i64>() {
                self.usage.default_limit = limit;
            }
        }

        if let Ok(val) = std::env::var("HUMANIZER_DEFAULT_STYLE") {
            self.service.default_style = val;
        }

        if let Ok(val) = std::env::var("HUMANIZER_REQUIRE_AUTH") {
            if let Ok(flag) = val.parse::<bool>() {
                self.service.require_auth = flag;
            }
        }

        if let Ok(val) = std::env::var("HUMANIZER_STARTER_PROBABILITY") {
            if let Ok(p) = val.parse::<f64>() {
                self.paraphrase.starter_probability = p;
            }
        }

        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.paraphrase.validate()?;
        self.usage.validate()?;

        if self.service.max_input_chars == 0 {
            return Err("max_input_chars must be greater than 0".to_string());
        }

        Ok(())
    }
}
