//! Two-tier session store for feed snapshots and the scroll restore
//! record.
//!
//! The in-process tier covers remounts within one app session and is
//! checked first; the durable tier is a pair of named JSON records in a
//! session directory, surviving a full teardown of the list view. Both
//! tiers expire through the snapshot's freshness window. Malformed or
//! stale files are deleted and read as absent; storage failures degrade
//! to a no-op for the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use ps_core::ports::{ClockPort, ScrollSessionPort, SnapshotStorePort};
use ps_core::FeedSnapshot;

const SNAPSHOT_FILE: &str = "feed-snapshot.json";
const SCROLL_FILE: &str = "scroll-restore.json";

/// The one-shot scroll restore record: offset plus "should restore"
/// marker, consumed by the scroll coordinator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScrollRecord {
    offset: f64,
    should_restore: bool,
}

/// Session directory for the durable tier, under the user cache dir.
pub fn default_session_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("photostream").join("session"))
}

pub struct SessionStore {
    dir: PathBuf,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
    cached: Mutex<Option<FeedSnapshot>>,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn ClockPort>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            clock,
            ttl,
            cached: Mutex::new(None),
        }
    }

    fn snapshot_path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }

    fn scroll_path(&self) -> PathBuf {
        self.dir.join(SCROLL_FILE)
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create session dir failed: {}", self.dir.display()))
    }

    /// Write `content` to `path` via a temp file and rename, so the
    /// record is either the previous contents or the fully written new
    /// contents.
    async fn atomic_write(&self, path: &Path, content: &str) -> Result<()> {
        self.ensure_dir().await?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp session record failed: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp session record failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;
        Ok(())
    }

    async fn remove_file(&self, path: &Path) {
        if let Err(err) = fs::remove_file(path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "session record removal failed");
            }
        }
    }

    /// Read and parse a JSON record; malformed content is deleted and
    /// reads as absent.
    async fn read_record<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Option<T> {
        let raw = match fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %err, "session record read failed");
                }
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed session record discarded");
                self.remove_file(path).await;
                None
            }
        }
    }

    async fn restore_marker_armed(&self) -> bool {
        self.read_record::<ScrollRecord>(&self.scroll_path())
            .await
            .map(|record| record.should_restore)
            .unwrap_or(false)
    }
}

#[async_trait]
impl SnapshotStorePort for SessionStore {
    async fn read(&self) -> Result<Option<FeedSnapshot>> {
        if !self.restore_marker_armed().await {
            return Ok(None);
        }

        let now_ms = self.clock.now_ms();

        // In-process tier first: cheaper, and covers same-session
        // remounts.
        {
            let mut cached = self.cached.lock().await;
            if let Some(snapshot) = cached.as_ref() {
                if snapshot.is_fresh(now_ms, self.ttl) {
                    debug!("serving snapshot from in-process tier");
                    return Ok(Some(snapshot.clone()));
                }
                *cached = None;
            }
        }

        // Durable tier is the fallback for a full teardown.
        let Some(snapshot) = self.read_record::<FeedSnapshot>(&self.snapshot_path()).await else {
            return Ok(None);
        };
        if !snapshot.is_fresh(now_ms, self.ttl) {
            debug!("stale durable snapshot discarded");
            self.remove_file(&self.snapshot_path()).await;
            return Ok(None);
        }

        *self.cached.lock().await = Some(snapshot.clone());
        Ok(Some(snapshot))
    }

    async fn write(&self, snapshot: &FeedSnapshot) -> Result<()> {
        *self.cached.lock().await = Some(snapshot.clone());

        let content =
            serde_json::to_string(snapshot).context("serialize feed snapshot failed")?;
        self.atomic_write(&self.snapshot_path(), &content).await
    }

    async fn clear(&self) -> Result<()> {
        *self.cached.lock().await = None;
        self.remove_file(&self.snapshot_path()).await;
        self.remove_file(&self.scroll_path()).await;
        Ok(())
    }
}

#[async_trait]
impl ScrollSessionPort for SessionStore {
    async fn record_departure(&self, offset: f64) -> Result<()> {
        let record = ScrollRecord {
            offset,
            should_restore: true,
        };
        let content = serde_json::to_string(&record).context("serialize scroll record failed")?;
        self.atomic_write(&self.scroll_path(), &content).await
    }

    async fn restore_target(&self) -> Result<Option<f64>> {
        Ok(self
            .read_record::<ScrollRecord>(&self.scroll_path())
            .await
            .filter(|record| record.should_restore)
            .map(|record| record.offset))
    }

    async fn clear_restore_target(&self) -> Result<()> {
        self.remove_file(&self.scroll_path()).await;
        Ok(())
    }
}
