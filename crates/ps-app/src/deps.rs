//! Application dependency grouping
//!
//! This is NOT a builder: no build steps, no defaults, no hidden logic.
//! Just a struct that bundles the ports the composition root hands to
//! the application services.

use std::sync::Arc;

use ps_core::ports::{CatalogPort, ClockPort, ScrollSessionPort, SnapshotStorePort, ViewportPort};

/// Everything the application services need, grouped for construction.
///
/// All dependencies are required - no defaults, no optional fields.
pub struct AppDeps {
    pub catalog: Arc<dyn CatalogPort>,
    pub snapshots: Arc<dyn SnapshotStorePort>,
    pub scroll_session: Arc<dyn ScrollSessionPort>,
    pub viewport: Arc<dyn ViewportPort>,
    pub clock: Arc<dyn ClockPort>,
}
