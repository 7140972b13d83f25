//! Hand-written mock ports shared by the service tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Semaphore;

use ps_core::ports::{
    CatalogError, CatalogPort, ClockPort, ScrollSessionPort, SnapshotStorePort, ViewportMetrics,
    ViewportPort,
};
use ps_core::{CatalogConfig, FeedSnapshot, Photo};

/// Short debounce so paused-clock tests stay readable.
pub fn test_config() -> CatalogConfig {
    CatalogConfig {
        prefetch_debounce: Duration::from_millis(50),
        ..CatalogConfig::default()
    }
}

/// Deterministic photos for page `page`.
pub fn photos(page: u32, count: usize) -> Vec<Photo> {
    (0..count)
        .map(|i| Photo {
            id: format!("p{page}-{i}"),
            author: format!("author {i}"),
            width: 4000,
            height: 3000,
            url: format!("https://example.com/photos/p{page}-{i}"),
            download_url: format!("https://example.com/dl/p{page}-{i}"),
        })
        .collect()
}

enum PageScript {
    Items(Vec<Photo>),
    Failure,
}

/// Catalog mock answering from per-page scripted queues.
///
/// An unscripted page answers with an empty result, matching the
/// catalog's end-of-data contract.
pub struct ScriptedCatalog {
    scripts: Mutex<HashMap<u32, VecDeque<PageScript>>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script_page(&self, page: u32, items: Vec<Photo>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(PageScript::Items(items));
    }

    pub fn script_failure(&self, page: u32) {
        self.scripts
            .lock()
            .unwrap()
            .entry(page)
            .or_default()
            .push_back(PageScript::Failure);
    }

    /// Pages fetched so far, in call order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn record(&self, page: u32) {
        self.calls.lock().unwrap().push(page);
    }

    pub(crate) fn scripted_result(&self, page: u32) -> Result<Vec<Photo>, CatalogError> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&page)
            .and_then(|queue| queue.pop_front());
        match script {
            Some(PageScript::Items(items)) => Ok(items),
            Some(PageScript::Failure) => Err(CatalogError::Http("connection reset".to_string())),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl CatalogPort for ScriptedCatalog {
    async fn list_page(&self, page: u32, _limit: u32) -> Result<Vec<Photo>, CatalogError> {
        self.record(page);
        self.scripted_result(page)
    }

    async fn get_detail(&self, id: &str) -> Result<Photo, CatalogError> {
        Ok(Photo {
            id: id.to_string(),
            author: "alejandro escamilla".to_string(),
            width: 3500,
            height: 2095,
            url: format!("https://example.com/photos/{id}"),
            download_url: format!("https://example.com/dl/{id}"),
        })
    }

    fn image_url(&self, id: &str, width: u32, height: u32) -> String {
        format!("https://example.com/id/{id}/{width}/{height}")
    }
}

/// Catalog mock that parks every fetch until the test releases it,
/// keeping a load observable mid-flight.
pub struct GatedCatalog {
    inner: ScriptedCatalog,
    gate: Semaphore,
}

impl GatedCatalog {
    pub fn new() -> Self {
        Self {
            inner: ScriptedCatalog::new(),
            gate: Semaphore::new(0),
        }
    }

    pub fn inner(&self) -> &ScriptedCatalog {
        &self.inner
    }

    /// Let exactly one parked fetch proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }
}

#[async_trait]
impl CatalogPort for GatedCatalog {
    async fn list_page(&self, page: u32, _limit: u32) -> Result<Vec<Photo>, CatalogError> {
        self.inner.record(page);
        self.gate
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
        self.inner.scripted_result(page)
    }

    async fn get_detail(&self, id: &str) -> Result<Photo, CatalogError> {
        self.gate
            .acquire()
            .await
            .expect("gate semaphore closed")
            .forget();
        self.inner.get_detail(id).await
    }

    fn image_url(&self, id: &str, width: u32, height: u32) -> String {
        self.inner.image_url(id, width, height)
    }
}

/// Single-tier in-memory snapshot store with call accounting.
pub struct MemorySnapshotStore {
    snapshot: Mutex<Option<FeedSnapshot>>,
    clears: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn empty() -> Self {
        Self {
            snapshot: Mutex::new(None),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn with_snapshot(snapshot: FeedSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn stored(&self) -> Option<FeedSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotStorePort for MemorySnapshotStore {
    async fn read(&self) -> Result<Option<FeedSnapshot>> {
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn write(&self, snapshot: &FeedSnapshot) -> Result<()> {
        *self.snapshot.lock().unwrap() = Some(snapshot.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().unwrap() = None;
        Ok(())
    }
}

pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ms),
        }
    }

    #[allow(dead_code)]
    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory scroll session record.
pub struct MemoryScrollSession {
    target: Mutex<Option<f64>>,
}

impl MemoryScrollSession {
    pub fn empty() -> Self {
        Self {
            target: Mutex::new(None),
        }
    }

    pub fn with_target(offset: f64) -> Self {
        Self {
            target: Mutex::new(Some(offset)),
        }
    }

    pub fn current(&self) -> Option<f64> {
        *self.target.lock().unwrap()
    }
}

#[async_trait]
impl ScrollSessionPort for MemoryScrollSession {
    async fn record_departure(&self, offset: f64) -> Result<()> {
        *self.target.lock().unwrap() = Some(offset);
        Ok(())
    }

    async fn restore_target(&self) -> Result<Option<f64>> {
        Ok(*self.target.lock().unwrap())
    }

    async fn clear_restore_target(&self) -> Result<()> {
        *self.target.lock().unwrap() = None;
        Ok(())
    }
}

/// Viewport mock answering `metrics()` from a script; the last entry
/// repeats once the script runs out.
pub struct ScriptedViewport {
    metrics: Mutex<VecDeque<ViewportMetrics>>,
    scrolled_to: Mutex<Vec<f64>>,
}

impl ScriptedViewport {
    pub fn new(script: Vec<ViewportMetrics>) -> Self {
        assert!(!script.is_empty(), "viewport script must not be empty");
        Self {
            metrics: Mutex::new(script.into()),
            scrolled_to: Mutex::new(Vec::new()),
        }
    }

    pub fn scrolled_to(&self) -> Vec<f64> {
        self.scrolled_to.lock().unwrap().clone()
    }
}

#[async_trait]
impl ViewportPort for ScriptedViewport {
    async fn metrics(&self) -> ViewportMetrics {
        let mut script = self.metrics.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            *script.front().unwrap()
        }
    }

    async fn scroll_to(&self, offset: f64) {
        self.scrolled_to.lock().unwrap().push(offset);
    }
}

pub fn viewport_metrics(offset: f64, content: f64, viewport: f64) -> ViewportMetrics {
    ViewportMetrics {
        scroll_offset: offset,
        scroll_height: content,
        viewport_height: viewport,
    }
}
