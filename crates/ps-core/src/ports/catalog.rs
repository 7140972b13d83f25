//! Catalog port - abstracts the remote image catalog
//!
//! The catalog exposes exactly two remote operations (paged list, single
//! detail) plus a pure URL builder for image variants. The core never
//! talks HTTP directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::photo::Photo;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(String),

    #[error("catalog returned status {0}")]
    Status(u16),

    #[error("catalog response could not be decoded: {0}")]
    Decode(String),
}

/// Catalog port - abstracts the remote image catalog.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetch one page of list entries.
    ///
    /// `page` is 1-based. An empty result is the sole end-of-data signal;
    /// there is no separate total-count field.
    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Photo>, CatalogError>;

    /// Fetch the raw catalog record for one photo.
    ///
    /// The response carries no title or description; callers derive those
    /// client-side.
    async fn get_detail(&self, id: &str) -> Result<Photo, CatalogError>;

    /// Build the URL of a resized image variant. Pure, no network call.
    fn image_url(&self, id: &str, width: u32, height: u32) -> String;
}
