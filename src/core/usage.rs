//! Per-user generation counting and quota checks
//!
//! Counts live in process memory only. They are created on a user's first
//! generation, only ever go up, and vanish on restart or [`UsageStore::reset`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::UsageConfig;

/// How many generations an identity may consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quota {
    Unlimited,
    Limited(u64),
}

impl Quota {
    /// Interpret a raw limit where any negative value means unlimited
    pub fn from_raw(limit: i64) -> Self {
        if limit < 0 {
            Self::Unlimited
        } else {
            Self::Limited(limit as u64)
        }
    }

    pub fn allows(&self, used: u64) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Limited(max) => used < *max,
        }
    }

    /// Generations left, `None` when unlimited
    pub fn remaining(&self, used: u64) -> Option<u64> {
        match self {
            Self::Unlimited => None,
            Self::Limited(max) => Some(max.saturating_sub(used)),
        }
    }
}

/// Limits table: a default plus per-email overrides, `-1` meaning unlimited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLimits {
    pub default_limit: i64,
    #[serde(default)]
    pub special_users: HashMap<String, i64>,
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self::from(&UsageConfig::default())
    }
}

impl From<&UsageConfig> for UsageLimits {
    fn from(config: &UsageConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            special_users: config.special_users.clone(),
        }
    }
}

impl UsageLimits {
    /// Load a limits file of the form `{"defaultLimit": 7, "specialUsers": {"a@b.c": -1}}`
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read limits file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse limits file {}", path.display()))
    }

    pub fn quota_for(&self, email: Option<&str>) -> Quota {
        let raw = email
            .and_then(|email| self.special_users.get(email))
            .copied()
            .unwrap_or(self.default_limit);
        Quota::from_raw(raw)
    }
}

/// Usage record for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub count: u64,
    pub last_generation: DateTime<Utc>,
}

/// Store of generation counts keyed by user id
pub trait UsageStore: Send + Sync {
    /// Generations consumed so far, zero for unknown users
    fn get(&self, user_id: &str) -> u64;

    /// Record one more generation and return the new count
    fn increment(&self, user_id: &str) -> u64;

    /// Quota for the identity behind `email`
    fn limit_for(&self, email: Option<&str>) -> Quota;

    /// Forget every count
    fn reset(&self);

    fn can_generate(&self, user_id: &str, email: Option<&str>) -> bool {
        self.limit_for(email).allows(self.get(user_id))
    }

    fn remaining(&self, user_id: &str, email: Option<&str>) -> Option<u64> {
        self.limit_for(email).remaining(self.get(user_id))
    }
}

/// Process-local usage store
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    limits: UsageLimits,
    records: Mutex<HashMap<String, UsageRecord>>,
}

impl InMemoryUsageStore {
    pub fn new(limits: UsageLimits) -> Self {
        Self {
            limits,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_config(config: &UsageConfig) -> Self {
        Self::new(UsageLimits::from(config))
    }

    pub fn record(&self, user_id: &str) -> Option<UsageRecord> {
        self.records.lock().get(user_id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.records.lock().len()
    }
}

impl UsageStore for InMemoryUsageStore {
    fn get(&self, user_id: &str) -> u64 {
        self.records.lock().get(user_id).map_or(0, |r| r.count)
    }

    fn increment(&self, user_id: &str) -> u64 {
        let mut records = self.records.lock();
        let now = Utc::now();
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord { count: 0, last_generation: now });
        record.count += 1;
        record.last_generation = now;
        tracing::debug!("User {} has used {} generations", user_id, record.count);
        record.count
    }

    fn limit_for(&self, email: Option<&str>) -> Quota {
        self.limits.quota_for(email)
    }

    fn reset(&self) {
        self.records.lock().clear();
    }
}
