//! # photostream
//!
//! Headless core of a photo browsing application backed by the Lorem
//! Picsum catalog: an infinite-scroll feed engine with one-page-ahead
//! prefetching, session snapshot persistence, scroll restoration, and a
//! detail loader. A UI shell supplies the [`ViewportPort`] and drives
//! the services; everything else is wired here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

pub use ps_app::{AppDeps, DetailState, PhotoDetailLoader, PhotoFeed, ScrollRestorer};
pub use ps_core::ports::{
    CatalogError, CatalogPort, ClockPort, ScrollSessionPort, SnapshotStorePort, ViewportMetrics,
    ViewportPort,
};
pub use ps_core::{CatalogConfig, FeedSnapshot, FeedState, LoadState, Photo, PhotoDetail};
pub use ps_infra::{PicsumCatalogClient, SessionStore, SystemClock};

/// The composed application: feed engine, scroll coordinator, and detail
/// loader sharing one set of adapters.
pub struct PhotoApp {
    pub feed: PhotoFeed,
    pub scroll: ScrollRestorer,
    pub detail: PhotoDetailLoader,
}

impl PhotoApp {
    /// Build the app with the default session directory under the user
    /// cache dir.
    pub fn new(config: CatalogConfig, viewport: Arc<dyn ViewportPort>) -> Result<Self> {
        let session_dir = ps_infra::session::default_session_dir()
            .context("no cache directory available for the session store")?;
        Ok(Self::with_session_dir(config, viewport, session_dir))
    }

    /// Build the app with an explicit session directory.
    pub fn with_session_dir(
        config: CatalogConfig,
        viewport: Arc<dyn ViewportPort>,
        session_dir: PathBuf,
    ) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
        let store = Arc::new(SessionStore::new(
            session_dir,
            Arc::clone(&clock),
            config.snapshot_ttl,
        ));
        let deps = AppDeps {
            catalog: Arc::new(PicsumCatalogClient::new(&config)),
            snapshots: store.clone(),
            scroll_session: store,
            viewport,
            clock,
        };
        Self::with_deps(deps, config)
    }

    /// Build the app from pre-constructed ports.
    pub fn with_deps(deps: AppDeps, config: CatalogConfig) -> Self {
        let feed = PhotoFeed::new(
            Arc::clone(&deps.catalog),
            deps.snapshots,
            deps.clock,
            config.clone(),
        );
        let scroll = ScrollRestorer::new(
            feed.clone(),
            deps.scroll_session,
            deps.viewport,
            config,
        );
        let detail = PhotoDetailLoader::new(deps.catalog);
        Self {
            feed,
            scroll,
            detail,
        }
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
