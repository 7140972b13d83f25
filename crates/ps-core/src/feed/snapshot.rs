use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::photo::Photo;

/// Serializable copy of the feed's list session state, minus status and
/// error. Written after every successful load and read once at mount
/// time, subject to a fixed freshness window measured from `saved_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub items: Vec<Photo>,
    pub cursor: u32,
    pub has_more: bool,

    /// Unix timestamp in milliseconds at write time.
    pub saved_at: i64,
}

impl FeedSnapshot {
    pub fn new(items: Vec<Photo>, cursor: u32, has_more: bool, saved_at: i64) -> Self {
        Self {
            items,
            cursor,
            has_more,
            saved_at,
        }
    }

    /// Whether the snapshot is still within the freshness window at `now_ms`.
    ///
    /// A snapshot stamped in the future counts as fresh; clock skew is not
    /// this type's problem to diagnose.
    pub fn is_fresh(&self, now_ms: i64, ttl: Duration) -> bool {
        let age_ms = now_ms.saturating_sub(self.saved_at);
        age_ms <= ttl.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    fn snapshot_at(saved_at: i64) -> FeedSnapshot {
        FeedSnapshot::new(Vec::new(), 2, true, saved_at)
    }

    #[test]
    fn test_fresh_within_window() {
        let snap = snapshot_at(1_000);
        assert!(snap.is_fresh(1_000 + TTL.as_millis() as i64 - 1, TTL));
    }

    #[test]
    fn test_stale_past_window() {
        let snap = snapshot_at(1_000);
        assert!(!snap.is_fresh(1_000 + TTL.as_millis() as i64 + 1, TTL));
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let snap = snapshot_at(5_000);
        assert!(snap.is_fresh(1_000, TTL));
    }

    #[test]
    fn test_round_trips_through_json() {
        let snap = FeedSnapshot::new(Vec::new(), 3, false, 42);
        let json = serde_json::to_string(&snap).unwrap();
        let back: FeedSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
