//! In-process handler for humanize requests
//!
//! Mirrors the HTTP contract a front end talks to (`POST {text, type?}` in,
//! `{humanizedText}` or `{error, message?}` out) without binding a socket.
//! The actual rewrite is delegated to a [`Humanizer`]; a remote model client
//! plugs in behind that trait, and [`RuleBasedHumanizer`] is the offline
//! fallback.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{HumanizerConfig, ParaphraseConfig, ServiceConfig};
use crate::core::usage::{InMemoryUsageStore, Quota, UsageStore};
use crate::paraphrase::Paraphraser;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HumanizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub humanized_text: String,
    /// Generations left for the caller, absent when unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), email: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HumanizeError {
    #[error("Text input is required.")]
    MissingText,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Text is too long ({actual} characters, limit {limit})")]
    TextTooLong { actual: usize, limit: usize },
    #[error("Authentication required.")]
    Unauthenticated,
    #[error("Method not allowed. Use POST.")]
    MethodNotAllowed,
    #[error("Generation limit reached.")]
    QuotaExceeded { limit: u64 },
    #[error("Failed to process text. Please try again.")]
    Upstream(String),
    #[error("Invalid response format from upstream")]
    MalformedUpstream,
}

impl HumanizeError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingText | Self::InvalidBody(_) | Self::TextTooLong { .. } => 400,
            Self::Unauthenticated => 401,
            Self::MethodNotAllowed => 405,
            Self::QuotaExceeded { .. } => 429,
            Self::Upstream(_) | Self::MalformedUpstream => 500,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let message = match self {
            Self::QuotaExceeded { limit } => {
                Some(format!("You have used all {} generations available to you.", limit))
            }
            Self::Upstream(details) => Some(details.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.to_string(),
            message,
        }
    }
}

/// Something that rewrites text, typically a remote language model
pub trait Humanizer: Send + Sync {
    fn humanize(&self, text: &str, style: Option<&str>) -> Result<String, HumanizeError>;

    fn name(&self) -> &'static str;
}

/// Offline humanizer backed by the rule-based paraphraser
#[derive(Debug, Clone)]
pub struct RuleBasedHumanizer {
    paraphraser: Paraphraser,
    default_style: String,
}

impl Default for RuleBasedHumanizer {
    fn default() -> Self {
        let config = ServiceConfig::default();
        Self::new(ParaphraseConfig::default(), config.default_style)
    }
}

impl RuleBasedHumanizer {
    pub fn new(config: ParaphraseConfig, default_style: impl Into<String>) -> Self {
        Self {
            paraphraser: Paraphraser::with_config(config),
            default_style: default_style.into(),
        }
    }
}

impl Humanizer for RuleBasedHumanizer {
    fn humanize(&self, text: &str, style: Option<&str>) -> Result<String, HumanizeError> {
        let tag = style.unwrap_or(self.default_style.as_str());
        Ok(self.paraphraser.paraphrase_tagged(text, tag))
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

/// Validates requests, enforces quotas, and forwards text to a [`Humanizer`]
pub struct HumanizeService {
    humanizer: Arc<dyn Humanizer>,
    usage: Arc<dyn UsageStore>,
    config: ServiceConfig,
}

impl HumanizeService {
    pub fn new(
        humanizer: Arc<dyn Humanizer>,
        usage: Arc<dyn UsageStore>,
        config: ServiceConfig,
    ) -> Self {
        Self { humanizer, usage, config }
    }

    /// Offline service: rule-based humanizer and an in-memory usage store
    pub fn offline(config: &HumanizerConfig) -> Self {
        let humanizer = RuleBasedHumanizer::new(
            config.paraphrase.clone(),
            config.service.default_style.clone(),
        );
        Self::new(
            Arc::new(humanizer),
            Arc::new(InMemoryUsageStore::with_config(&config.usage)),
            config.service.clone(),
        )
    }

    pub fn usage(&self) -> &Arc<dyn UsageStore> {
        &self.usage
    }

    /// Handle a raw request. The usage count is only incremented after the
    /// humanizer succeeds.
    pub fn handle(
        &self,
        method: &str,
        identity: Option<&Identity>,
        body: &str,
    ) -> Result<HumanizeResponse, HumanizeError> {
        if !method.eq_ignore_ascii_case("POST") {
            return Err(HumanizeError::MethodNotAllowed);
        }

        let request: HumanizeRequest = serde_json::from_str(body)
            .map_err(|err| HumanizeError::InvalidBody(err.to_string()))?;

        self.process(identity, request)
    }

    pub fn process(
        &self,
        identity: Option<&Identity>,
        request: HumanizeRequest,
    ) -> Result<HumanizeResponse, HumanizeError> {
        let text = match request.text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(HumanizeError::MissingText),
        };

        let length = text.chars().count();
        if length > self.config.max_input_chars {
            return Err(HumanizeError::TextTooLong {
                actual: length,
                limit: self.config.max_input_chars,
            });
        }

        if self.config.require_auth && identity.is_none() {
            return Err(HumanizeError::Unauthenticated);
        }

        let (user_id, email) = match identity {
            Some(identity) => (identity.user_id.as_str(), identity.email.as_deref()),
            None => ("anonymous", None),
        };

        if !self.usage.can_generate(user_id, email) {
            let limit = match self.usage.limit_for(email) {
                Quota::Limited(limit) => limit,
                Quota::Unlimited => 0,
            };
            tracing::info!("User {} hit the generation limit of {}", user_id, limit);
            return Err(HumanizeError::QuotaExceeded { limit });
        }

        let humanized = self
            .humanizer
            .humanize(text, request.style.as_deref())
            .map_err(|err| {
                tracing::warn!("{} humanizer failed: {}", self.humanizer.name(), err);
                err
            })?;

        if humanized.trim().is_empty() {
            return Err(HumanizeError::MalformedUpstream);
        }

        self.usage.increment(user_id);
        let remaining = self.usage.remaining(user_id, email);

        tracing::debug!(
            humanizer = self.humanizer.name(),
            user = user_id,
            "humanized {} characters",
            length
        );

        Ok(HumanizeResponse {
            humanized_text: humanized.trim().to_string(),
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UsageLimits;
    use std::collections::HashMap;

    struct FailingHumanizer;

    impl Humanizer for FailingHumanizer {
        fn humanize(&self, _text: &str, _style: Option<&str>) -> Result<String, HumanizeError> {
            Err(HumanizeError::Upstream("API Error: 503 Service Unavailable".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct EchoHumanizer;

    impl Humanizer for EchoHumanizer {
        fn humanize(&self, text: &str, _style: Option<&str>) -> Result<String, HumanizeError> {
            Ok(format!("  {}  ", text.to_uppercase()))
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    fn service_with(humanizer: Arc<dyn Humanizer>, limit: i64, require_auth: bool) -> HumanizeService {
        let limits = UsageLimits { default_limit: limit, special_users: HashMap::new() };
        let config = ServiceConfig { require_auth, ..ServiceConfig::default() };
        HumanizeService::new(humanizer, Arc::new(InMemoryUsageStore::new(limits)), config)
    }

    #[test]
    fn test_wrong_method() {
        let service = service_with(Arc::new(EchoHumanizer), 5, false);
        let err = service.handle("GET", None, r#"{"text":"hi"}"#).unwrap_err();
        assert_eq!(err, HumanizeError::MethodNotAllowed);
        assert_eq!(err.status_code(), 405);
    }

    #[test]
    fn test_missing_text() {
        let service = service_with(Arc::new(EchoHumanizer), 5, false);

        for body in [r#"{}"#, r#"{"text":""}"#, r#"{"text":"   "}"#, r#"{"type":"academic"}"#] {
            let err = service.handle("POST", None, body).unwrap_err();
            assert_eq!(err.status_code(), 400, "body {}", body);
        }
    }

    #[test]
    fn test_invalid_json() {
        let service = service_with(Arc::new(EchoHumanizer), 5, false);
        let err = service.handle("POST", None, "{text").unwrap_err();
        assert!(matches!(err, HumanizeError::InvalidBody(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_auth_required() {
        let service = service_with(Arc::new(EchoHumanizer), 5, true);
        let err = service.handle("POST", None, r#"{"text":"hi"}"#).unwrap_err();
        assert_eq!(err.status_code(), 401);

        let identity = Identity::new("u1");
        assert!(service.handle("POST", Some(&identity), r#"{"text":"hi"}"#).is_ok());
    }

    #[test]
    fn test_success_trims_and_counts() {
        let service = service_with(Arc::new(EchoHumanizer), 3, false);
        let identity = Identity::new("u1");

        let response = service.handle("post", Some(&identity), r#"{"text":"hello"}"#).unwrap();

        assert_eq!(response.humanized_text, "HELLO");
        assert_eq!(response.remaining, Some(2));
        assert_eq!(service.usage().get("u1"), 1);
    }

    #[test]
    fn test_quota_exceeded() {
        let service = service_with(Arc::new(EchoHumanizer), 1, false);
        let identity = Identity::new("u1");

        assert!(service.handle("POST", Some(&identity), r#"{"text":"one"}"#).is_ok());
        let err = service.handle("POST", Some(&identity), r#"{"text":"two"}"#).unwrap_err();

        assert_eq!(err, HumanizeError::QuotaExceeded { limit: 1 });
        assert_eq!(err.status_code(), 429);
        assert!(err.to_body().message.is_some());
    }

    #[test]
    fn test_failure_does_not_consume_quota() {
        let service = service_with(Arc::new(FailingHumanizer), 1, false);
        let identity = Identity::new("u1");

        let err = service.handle("POST", Some(&identity), r#"{"text":"hi"}"#).unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert_eq!(service.usage().get("u1"), 0);
        let body = err.to_body();
        assert_eq!(body.error, "Failed to process text. Please try again.");
        assert_eq!(body.message.as_deref(), Some("API Error: 503 Service Unavailable"));
    }

    #[test]
    fn test_text_too_long() {
        let mut service = service_with(Arc::new(EchoHumanizer), 5, false);
        service.config.max_input_chars = 3;
        let err = service.handle("POST", None, r#"{"text":"long text"}"#).unwrap_err();
        assert_eq!(err, HumanizeError::TextTooLong { actual: 9, limit: 3 });
    }

    #[test]
    fn test_offline_service_unknown_type_is_identity() {
        let service = HumanizeService::offline(&HumanizerConfig::default());
        let response = service
            .handle("POST", None, r#"{"text":"Keep me exactly.","type":"ultra"}"#)
            .unwrap();
        assert_eq!(response.humanized_text, "Keep me exactly.");
        assert_eq!(response.remaining, Some(6));
    }

    #[test]
    fn test_response_wire_format() {
        let response = HumanizeResponse { humanized_text: "x".to_string(), remaining: None };
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"humanizedText":"x"}"#);

        let body = HumanizeError::MissingText.to_body();
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Text input is required."}"#);
    }
}
