//! Core functionality module
//!
//! Contains text statistics and the per-user usage counter

pub mod stats;
pub mod usage;

// Re-export main types
pub use stats::{word_count, TextStats};
pub use usage::{InMemoryUsageStore, Quota, UsageLimits, UsageRecord, UsageStore};
