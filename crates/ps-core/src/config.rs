//! Catalog and engine configuration.

use std::time::Duration;

/// Configuration for the catalog client and the feed engine.
///
/// Plain data with defaults matching the reference deployment; no
/// validation or policy lives here.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the remote image catalog.
    pub base_url: String,

    /// Page size used for list fetches.
    pub default_page_size: u32,

    /// Maximum age a persisted snapshot may have before it is discarded.
    pub snapshot_ttl: Duration,

    /// Micro-delay before a speculative prefetch issues its fetch, so a
    /// burst of scroll events schedules at most one look-ahead request.
    pub prefetch_debounce: Duration,

    /// Rendered content must cover at least this fraction of the viewport
    /// height before auto-load-more stops topping the list up.
    pub fill_viewport_ratio: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://picsum.photos".to_string(),
            default_page_size: 20,
            snapshot_ttl: Duration::from_secs(5 * 60),
            prefetch_debounce: Duration::from_millis(50),
            fill_viewport_ratio: 0.75,
        }
    }
}
