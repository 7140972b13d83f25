//! Viewport port - abstracts the scrollable list surface
//!
//! Implemented by the UI shell. The core only needs to measure the
//! rendered content and to move the scroll position; layout itself stays
//! out of scope.

use async_trait::async_trait;

/// Measurements of the scrollable list surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Current vertical scroll offset.
    pub scroll_offset: f64,

    /// Total height of the rendered content.
    pub scroll_height: f64,

    /// Height of the visible viewport.
    pub viewport_height: f64,
}

impl ViewportMetrics {
    /// The maximum offset the surface can actually be scrolled to.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// Whether the scrollable overflow is smaller than `ratio` of the
    /// viewport height, i.e. the list is too short to scroll comfortably.
    pub fn is_underfilled(&self, ratio: f64) -> bool {
        self.scroll_height - self.viewport_height < self.viewport_height * ratio
    }
}

#[async_trait]
pub trait ViewportPort: Send + Sync {
    async fn metrics(&self) -> ViewportMetrics;

    /// Jump (not animate) to the given vertical offset.
    async fn scroll_to(&self, offset: f64);
}
