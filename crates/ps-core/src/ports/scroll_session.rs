//! Scroll session port - abstracts the one-shot scroll restore record
//!
//! Holds the vertical offset recorded when the user leaves the list for a
//! detail view, together with a "should restore" marker. The marker is
//! consumed exactly once per departure; it lives in session-scoped
//! storage, not in the TTL-bounded snapshot store.

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ScrollSessionPort: Send + Sync {
    /// Record the offset the list was scrolled to, and arm the restore
    /// marker.
    async fn record_departure(&self, offset: f64) -> Result<()>;

    /// Peek at the armed restore target, if any. Does not consume it.
    async fn restore_target(&self) -> Result<Option<f64>>;

    /// Drop the marker and the recorded offset.
    async fn clear_restore_target(&self) -> Result<()>;
}
