//! Snapshot cache with a time-to-live policy
//!
//! The source tables are re-read at most once per TTL window. The cache is
//! an explicit entry `{snapshot, fetched_at}` plus a pure staleness check,
//! so the policy is testable without a runtime clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FlowEntry, Parameter};

/// Immutable view of both source tables at one fetch instant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<FlowEntry>,
    pub parameters: Vec<Parameter>,
}

/// A fetched snapshot and when it was fetched
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub snapshot: Snapshot,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            fetched_at: Utc::now(),
        }
    }
}

/// Staleness policy: a snapshot older than `ttl_secs` must be refetched
pub fn is_stale(now: DateTime<Utc>, fetched_at: DateTime<Utc>, ttl_secs: u64) -> bool {
    now - fetched_at >= Duration::seconds(ttl_secs as i64)
}
