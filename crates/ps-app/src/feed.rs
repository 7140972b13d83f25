//! Pagination and prefetch engine for the photo feed.
//!
//! Owns the growing photo collection, the page cursor, the end-of-data
//! flag, and a one-page-ahead speculative fetch pipeline. Effective list
//! mutations are serialized by the load status: the engine itself refuses
//! to start a second load while one is in flight, rather than trusting
//! callers to gate on `is_loading`.
//!
//! A generation token, bumped on every refresh, is the sole concurrency
//! guard against late background results: a page result or prefetch
//! carrying a stale token is discarded instead of applied.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use ps_core::messages;
use ps_core::ports::{CatalogError, CatalogPort, ClockPort, SnapshotStorePort};
use ps_core::{CatalogConfig, FeedSnapshot, FeedState, LoadState, Photo};

const FIRST_PAGE: u32 = 1;

/// The paginated photo feed engine.
///
/// Cheap to clone; clones share the same session state.
#[derive(Clone)]
pub struct PhotoFeed {
    catalog: Arc<dyn CatalogPort>,
    snapshots: Arc<dyn SnapshotStorePort>,
    clock: Arc<dyn ClockPort>,
    config: CatalogConfig,
    inner: Arc<Mutex<FeedInner>>,
    status_tx: watch::Sender<LoadState>,
}

struct FeedInner {
    items: Vec<Photo>,
    cursor: u32,
    has_more: bool,
    status: LoadState,
    error: Option<String>,
    generation: u64,
    prefetch: Option<PrefetchSlot>,
    /// Set when the end-of-list trigger fired while a load was in flight;
    /// re-fires `load_more` once that load settles successfully.
    pending_end_reached: bool,
}

/// At most one speculative fetch exists at a time.
struct PrefetchSlot {
    page: u32,
    generation: u64,
    state: PrefetchState,
}

enum PrefetchState {
    Pending(JoinHandle<Result<Vec<Photo>, CatalogError>>),
    Ready(Vec<Photo>),
}

impl PrefetchSlot {
    fn invalidate(self) {
        if let PrefetchState::Pending(handle) = self.state {
            handle.abort();
        }
    }
}

impl PhotoFeed {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        snapshots: Arc<dyn SnapshotStorePort>,
        clock: Arc<dyn ClockPort>,
        config: CatalogConfig,
    ) -> Self {
        let (status_tx, _) = watch::channel(LoadState::Idle);
        Self {
            catalog,
            snapshots,
            clock,
            config,
            inner: Arc::new(Mutex::new(FeedInner {
                items: Vec::new(),
                cursor: 0,
                has_more: true,
                status: LoadState::Idle,
                error: None,
                generation: 0,
                prefetch: None,
                pending_end_reached: false,
            })),
            status_tx,
        }
    }

    /// Subscribe to status transitions. The receiver starts at the
    /// current status.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.status_tx.subscribe()
    }

    /// A copy of the current list session state.
    pub async fn state(&self) -> FeedState {
        let inner = self.inner.lock().await;
        FeedState {
            items: inner.items.clone(),
            cursor: inner.cursor,
            has_more: inner.has_more,
            status: inner.status,
            error: inner.error.clone(),
        }
    }

    pub async fn has_more(&self) -> bool {
        self.inner.lock().await.has_more
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Mount-time entry point: hydrate from a fresh session snapshot if
    /// one exists, otherwise fetch the first page.
    pub async fn start(&self) {
        let span = info_span!("feed.start");
        async {
            match self.snapshots.read().await {
                Ok(Some(snapshot)) => {
                    info!(
                        cursor = snapshot.cursor,
                        items = snapshot.items.len(),
                        "hydrating feed from session snapshot"
                    );
                    let next_page = {
                        let mut inner = self.inner.lock().await;
                        inner.items = snapshot.items;
                        inner.cursor = snapshot.cursor;
                        inner.has_more = snapshot.has_more;
                        inner.status = LoadState::Success;
                        inner.error = None;
                        inner.cursor + 1
                    };
                    self.status_tx.send_replace(LoadState::Success);
                    self.prefetch_page(next_page).await;
                }
                Ok(None) => self.load_page(FIRST_PAGE).await,
                Err(err) => {
                    warn!(error = %err, "session snapshot read failed, loading first page");
                    self.load_page(FIRST_PAGE).await;
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Load one page directly, bypassing the prefetch pipeline.
    ///
    /// A no-op while another load is in flight. Fetch failures land in
    /// the error status with a user-facing message; retrying is a manual
    /// re-invocation.
    pub async fn load_page(&self, page: u32) {
        let generation = {
            let mut inner = self.inner.lock().await;
            if !inner.status.can_start_load() {
                debug!(page, "load already in flight, ignoring load_page");
                return;
            }
            inner.status = LoadState::Loading;
            inner.error = None;
            inner.generation
        };
        self.status_tx.send_replace(LoadState::Loading);

        let result = self
            .catalog
            .list_page(page, self.config.default_page_size)
            .await;
        self.apply_page_result(page, result, generation).await;
    }

    /// Load the next page, consuming the prefetch slot when it lines up.
    ///
    /// No-ops if the end of the feed was reached; arms the pending flag
    /// instead when a load is already in flight. After a successful
    /// application the following page is speculatively prefetched.
    pub fn load_more(
        &self,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
        let (next_page, slot, generation) = {
            let mut inner = self.inner.lock().await;
            if !inner.has_more {
                return;
            }
            if inner.status.is_loading() {
                inner.pending_end_reached = true;
                return;
            }
            let next_page = inner.cursor + 1;
            let matches = matches!(
                &inner.prefetch,
                Some(slot) if slot.page == next_page && slot.generation == inner.generation
            );
            let slot = if matches {
                let slot = inner.prefetch.take();
                inner.status = LoadState::Loading;
                inner.error = None;
                slot
            } else {
                if let Some(stale) = inner.prefetch.take() {
                    // Slot no longer lines up with the cursor.
                    stale.invalidate();
                }
                None
            };
            (next_page, slot, inner.generation)
        };

        match slot {
            Some(slot) => {
                self.status_tx.send_replace(LoadState::Loading);
                let result = match slot.state {
                    PrefetchState::Ready(photos) => {
                        debug!(page = next_page, "applying completed prefetch");
                        Ok(photos)
                    }
                    PrefetchState::Pending(handle) => match handle.await {
                        Ok(Ok(photos)) => Ok(photos),
                        Ok(Err(err)) => {
                            debug!(
                                page = next_page,
                                error = %err,
                                "prefetch failed, refetching page directly"
                            );
                            self.catalog
                                .list_page(next_page, self.config.default_page_size)
                                .await
                        }
                        Err(_) => {
                            debug!(
                                page = next_page,
                                "prefetch task did not complete, refetching page directly"
                            );
                            self.catalog
                                .list_page(next_page, self.config.default_page_size)
                                .await
                        }
                    },
                };
                self.apply_page_result(next_page, result, generation).await;
            }
            None => self.load_page(next_page).await,
        }

        // Keep the pipeline one page ahead.
        let state = self.state().await;
        if state.status.is_success() && state.has_more && state.cursor == next_page {
            self.prefetch_page(next_page + 1).await;
        }
        })
    }

    /// Entry point for the end-of-list visibility trigger.
    ///
    /// Unlike `load_more`, a call that arrives mid-load is not dropped:
    /// it re-fires once the in-flight load completes successfully.
    pub async fn notify_end_reached(&self) {
        let fire = {
            let mut inner = self.inner.lock().await;
            if !inner.has_more {
                return;
            }
            if inner.status.is_loading() {
                inner.pending_end_reached = true;
                false
            } else {
                true
            }
        };
        if fire {
            self.load_more().await;
        }
    }

    /// Speculatively fetch `page` in the background.
    ///
    /// Leaves the visible status untouched. An empty result flips
    /// `has_more`; errors silently discard the slot so the next real
    /// load retries the fetch. The fetch is debounced by a micro-delay
    /// so a burst of triggers schedules one request.
    pub async fn prefetch_page(&self, page: u32) {
        let mut inner = self.inner.lock().await;
        if !inner.has_more {
            return;
        }
        if let Some(slot) = &inner.prefetch {
            if slot.page == page && slot.generation == inner.generation {
                // Already in flight or resolved.
                return;
            }
        }
        if let Some(stale) = inner.prefetch.take() {
            stale.invalidate();
        }

        let generation = inner.generation;
        let catalog = Arc::clone(&self.catalog);
        let shared = Arc::clone(&self.inner);
        let limit = self.config.default_page_size;
        let debounce = self.config.prefetch_debounce;
        debug!(page, "scheduling prefetch");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let result = catalog.list_page(page, limit).await;

            // Record the outcome in the slot, unless the slot was taken or
            // invalidated while the fetch was in flight.
            let mut inner = shared.lock().await;
            let slot_live = inner.generation == generation
                && matches!(
                    &inner.prefetch,
                    Some(slot) if slot.page == page && slot.generation == generation
                );
            if slot_live {
                match &result {
                    Ok(photos) if photos.is_empty() => {
                        debug!(page, "prefetch hit end of feed");
                        inner.has_more = false;
                        inner.prefetch = None;
                    }
                    Ok(photos) => {
                        if let Some(slot) = inner.prefetch.as_mut() {
                            slot.state = PrefetchState::Ready(photos.clone());
                        }
                    }
                    Err(err) => {
                        debug!(page, error = %err, "prefetch failed, slot discarded");
                        inner.prefetch = None;
                    }
                }
            }
            result
        });

        inner.prefetch = Some(PrefetchSlot {
            page,
            generation,
            state: PrefetchState::Pending(handle),
        });
    }

    /// Throw the session away and reload from the first page.
    ///
    /// Clears items and the persisted snapshot, resets the cursor and the
    /// end-of-data flag, and bumps the generation so any in-flight fetch
    /// or prefetch result is discarded instead of applied.
    pub async fn refresh(&self) {
        let span = info_span!("feed.refresh");
        async {
            {
                let mut inner = self.inner.lock().await;
                inner.generation += 1;
                inner.items.clear();
                inner.cursor = 0;
                inner.has_more = true;
                inner.status = LoadState::Idle;
                inner.error = None;
                inner.pending_end_reached = false;
                if let Some(slot) = inner.prefetch.take() {
                    slot.invalidate();
                }
            }
            self.status_tx.send_replace(LoadState::Idle);

            if let Err(err) = self.snapshots.clear().await {
                warn!(error = %err, "session snapshot clear failed");
            }
            self.load_page(FIRST_PAGE).await;
        }
        .instrument(span)
        .await
    }

    async fn apply_page_result(
        &self,
        page: u32,
        result: Result<Vec<Photo>, CatalogError>,
        generation: u64,
    ) {
        let (status, snapshot, refire) = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation {
                debug!(page, "discarding page result from a previous generation");
                return;
            }
            match result {
                Ok(photos) if photos.is_empty() => {
                    debug!(page, "empty page, end of feed");
                    inner.has_more = false;
                    inner.status = LoadState::Success;
                    inner.pending_end_reached = false;
                    (LoadState::Success, Some(self.snapshot_of(&inner)), false)
                }
                Ok(photos) => {
                    debug!(page, count = photos.len(), "page applied");
                    if page == FIRST_PAGE {
                        inner.items = photos;
                    } else {
                        inner.items.extend(photos);
                    }
                    inner.cursor = page;
                    inner.status = LoadState::Success;
                    let refire = inner.pending_end_reached && inner.has_more;
                    inner.pending_end_reached = false;
                    (LoadState::Success, Some(self.snapshot_of(&inner)), refire)
                }
                Err(err) => {
                    warn!(page, error = %err, "list page fetch failed");
                    inner.status = LoadState::Error;
                    inner.error = Some(messages::FETCH_PHOTOS_FAILED.to_string());
                    inner.pending_end_reached = false;
                    (LoadState::Error, None, false)
                }
            }
        };
        self.status_tx.send_replace(status);

        // Snapshot writes happen only on success; persistence failures
        // degrade silently.
        if let Some(snapshot) = snapshot {
            if let Err(err) = self.snapshots.write(&snapshot).await {
                warn!(error = %err, "session snapshot write failed");
            }
        }

        if refire {
            let feed = self.clone();
            tokio::spawn(async move { feed.load_more().await });
        }
    }

    fn snapshot_of(&self, inner: &FeedInner) -> FeedSnapshot {
        FeedSnapshot::new(
            inner.items.clone(),
            inner.cursor,
            inner.has_more,
            self.clock.now_ms(),
        )
    }
}
