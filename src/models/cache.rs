use crate::models::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

/// Persisted form of a cached snapshot: `{ "savedAt": <epoch ms>, "payload": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub saved_at: i64,
    pub payload: Snapshot,
}

impl CacheEntry {
    pub fn is_fresh(&self, ttl_ms: i64, now_ms: i64) -> bool {
        now_ms - self.saved_at < ttl_ms
    }
}
