//! Scroll restoration coordinator.
//!
//! When the user leaves the list for a detail view and returns, the list
//! should resume at the offset it had before leaving. The coordinator
//! records the offset on departure and replays it on return, but only
//! after the feed has finished reloading and the rendered content is
//! tall enough to reach the target: restoration completion is gated on
//! content height, which is gated on pagination, which is gated on the
//! end-of-data flag.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info_span, warn, Instrument};

use ps_core::ports::{ScrollSessionPort, ViewportPort};
use ps_core::{CatalogConfig, LoadState};

use crate::feed::PhotoFeed;

#[derive(Clone)]
pub struct ScrollRestorer {
    feed: PhotoFeed,
    session: Arc<dyn ScrollSessionPort>,
    viewport: Arc<dyn ViewportPort>,
    config: CatalogConfig,
}

impl ScrollRestorer {
    pub fn new(
        feed: PhotoFeed,
        session: Arc<dyn ScrollSessionPort>,
        viewport: Arc<dyn ViewportPort>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            feed,
            session,
            viewport,
            config,
        }
    }

    /// Capture the current offset and arm the restore marker. Call right
    /// before navigating away to a detail view.
    pub async fn record_departure(&self) -> Result<()> {
        let metrics = self.viewport.metrics().await;
        debug!(offset = metrics.scroll_offset, "recording departure offset");
        self.session.record_departure(metrics.scroll_offset).await
    }

    /// Replay the recorded offset once the list has reloaded.
    ///
    /// Consumes the marker exactly once: after the scroll lands, or
    /// immediately if the reload ends in the error status (no restoration
    /// is attempted on error). Storage failures degrade to a no-op.
    pub async fn restore_on_return(&self) -> Result<()> {
        let span = info_span!("scroll.restore");
        async {
            let target = match self.session.restore_target().await {
                Ok(Some(target)) => target,
                Ok(None) => return Ok(()),
                Err(err) => {
                    warn!(error = %err, "restore target read failed");
                    return Ok(());
                }
            };

            // Wait for the reload to settle before measuring anything.
            let mut status_rx = self.feed.subscribe();
            loop {
                let status = *status_rx.borrow_and_update();
                match status {
                    LoadState::Error => {
                        self.session.clear_restore_target().await.ok();
                        return Ok(());
                    }
                    LoadState::Success => break,
                    LoadState::Idle | LoadState::Loading => {
                        if status_rx.changed().await.is_err() {
                            return Ok(());
                        }
                    }
                }
            }

            // Grow the list until the target offset is actually reachable
            // and the viewport is reasonably filled.
            loop {
                let metrics = self.viewport.metrics().await;
                let reachable = metrics.max_scroll_offset() >= target;
                let filled = !metrics.is_underfilled(self.config.fill_viewport_ratio);
                let state = self.feed.state().await;
                if (reachable && filled) || !state.has_more {
                    break;
                }

                let before = state.items.len();
                self.feed.load_more().await;

                let after = self.feed.state().await;
                if after.status.is_error() {
                    self.session.clear_restore_target().await.ok();
                    return Ok(());
                }
                if after.items.len() == before && after.has_more {
                    // The list stopped growing; scroll to what exists.
                    break;
                }
            }

            let metrics = self.viewport.metrics().await;
            let offset = target.min(metrics.max_scroll_offset());
            debug!(target, offset, "restoring scroll position");
            self.viewport.scroll_to(offset).await;
            self.session.clear_restore_target().await?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Top the list up while the rendered content covers less than the
    /// configured fraction of the viewport. Call after the list view
    /// finishes a layout pass.
    pub async fn fill_viewport(&self) {
        loop {
            let state = self.feed.state().await;
            if !state.status.is_success() || !state.has_more {
                return;
            }
            let metrics = self.viewport.metrics().await;
            if !metrics.is_underfilled(self.config.fill_viewport_ratio) {
                return;
            }

            let before = state.items.len();
            self.feed.load_more().await;
            if self.feed.state().await.items.len() == before {
                return;
            }
        }
    }
}
