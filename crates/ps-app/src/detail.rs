//! Single-photo detail loader.
//!
//! Structurally much simpler than the feed: one resource, one
//! idle → loading → success | error pass per identifier, no caching and
//! no retry policy beyond loading again.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{info_span, warn, Instrument};

use ps_core::messages;
use ps_core::ports::{CatalogError, CatalogPort};
use ps_core::{LoadState, PhotoDetail};

/// Published view of the detail loader's state.
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    pub photo: Option<PhotoDetail>,
    pub status: LoadState,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct PhotoDetailLoader {
    catalog: Arc<dyn CatalogPort>,
    inner: Arc<Mutex<DetailInner>>,
    status_tx: watch::Sender<LoadState>,
}

struct DetailInner {
    current_id: Option<String>,
    state: DetailState,
}

impl PhotoDetailLoader {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        let (status_tx, _) = watch::channel(LoadState::Idle);
        Self {
            catalog,
            inner: Arc::new(Mutex::new(DetailInner {
                current_id: None,
                state: DetailState::default(),
            })),
            status_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.status_tx.subscribe()
    }

    pub async fn state(&self) -> DetailState {
        self.inner.lock().await.state.clone()
    }

    /// Load the detail record for `id`.
    ///
    /// Loading the identifier already shown is a no-op; switching
    /// identifiers starts over, and a result arriving for an identifier
    /// that is no longer current is dropped.
    pub async fn load(&self, id: &str) {
        let span = info_span!("detail.load", id);
        async {
            {
                let mut inner = self.inner.lock().await;
                if inner.current_id.as_deref() == Some(id) && inner.state.status.is_success() {
                    return;
                }
                inner.current_id = Some(id.to_string());
                inner.state = DetailState {
                    photo: None,
                    status: LoadState::Loading,
                    error: None,
                };
            }
            self.status_tx.send_replace(LoadState::Loading);

            let result = self.catalog.get_detail(id).await;

            let status = {
                let mut inner = self.inner.lock().await;
                if inner.current_id.as_deref() != Some(id) {
                    // Identifier changed while the fetch was in flight.
                    return;
                }
                match result {
                    Ok(photo) => {
                        inner.state = DetailState {
                            photo: Some(PhotoDetail::derive(photo)),
                            status: LoadState::Success,
                            error: None,
                        };
                    }
                    Err(err) => {
                        warn!(id, error = %err, "detail fetch failed");
                        let message = match err {
                            CatalogError::Status(404) => messages::PHOTO_NOT_FOUND,
                            _ => messages::FETCH_PHOTO_DETAIL_FAILED,
                        };
                        inner.state = DetailState {
                            photo: None,
                            status: LoadState::Error,
                            error: Some(message.to_string()),
                        };
                    }
                }
                inner.state.status
            };
            self.status_tx.send_replace(status);
        }
        .instrument(span)
        .await
    }
}
