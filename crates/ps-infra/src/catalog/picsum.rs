//! HTTP client for the Lorem Picsum catalog.
//!
//! REST-style surface: GET with query parameters for the list page, GET
//! with path segments for detail and image URLs. No retries and no
//! request timeout; a fetch resolves or rejects on its own schedule,
//! matching the upstream contract.

use async_trait::async_trait;
use tracing::debug;

use ps_core::ports::{CatalogError, CatalogPort};
use ps_core::{CatalogConfig, Photo};

const LIST_ENDPOINT: &str = "/v2/list";
const PHOTO_ENDPOINT: &str = "/id";

pub struct PicsumCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl PicsumCatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, u32)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|err| CatalogError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| CatalogError::Decode(err.to_string()))
    }
}

#[async_trait]
impl CatalogPort for PicsumCatalogClient {
    async fn list_page(&self, page: u32, limit: u32) -> Result<Vec<Photo>, CatalogError> {
        debug!(page, limit, "fetching catalog page");
        self.get_json(
            format!("{}{}", self.base_url, LIST_ENDPOINT),
            &[("page", page), ("limit", limit)],
        )
        .await
    }

    async fn get_detail(&self, id: &str) -> Result<Photo, CatalogError> {
        debug!(id, "fetching photo detail");
        self.get_json(
            format!("{}{}/{}/info", self.base_url, PHOTO_ENDPOINT, id),
            &[],
        )
        .await
    }

    fn image_url(&self, id: &str, width: u32, height: u32) -> String {
        format!(
            "{}{}/{}/{}/{}",
            self.base_url, PHOTO_ENDPOINT, id, width, height
        )
    }
}
