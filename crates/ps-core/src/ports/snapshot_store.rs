//! Snapshot store port - abstracts persisted list state
//!
//! Implementations hold the most recent successful list state in two
//! tiers: an in-process cache for same-session remounts and a durable
//! session record surviving a full teardown of the list view.

use anyhow::Result;
use async_trait::async_trait;

use crate::feed::FeedSnapshot;

#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    /// Read the persisted snapshot, if one should be restored.
    ///
    /// Returns a snapshot only when the last navigation away from the
    /// list left a restore marker behind and the stored copy is still
    /// within the freshness window. A stale durable copy found along the
    /// way is deleted as a side effect. Malformed data reads as absent.
    async fn read(&self) -> Result<Option<FeedSnapshot>>;

    /// Persist a snapshot to both tiers. Called after every successful
    /// load; the caller stamps `saved_at`.
    async fn write(&self, snapshot: &FeedSnapshot) -> Result<()>;

    /// Empty both tiers and drop the restore marker. Called on explicit
    /// refresh.
    async fn clear(&self) -> Result<()>;
}
