//! HTTP client for the notebook portal.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::types::{NotebookListResponse, NotebookSummary, RemovalResponse, StatusResponse};
use crate::api::{ApiError, NotebookApi};
use crate::config::PortalConfig;

/// Talks to the portal's JSON endpoints over HTTP.
pub struct PortalClient {
    client: Client,
    base_url: Url,
}

impl PortalClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: Url) -> Result<R, ApiError> {
        debug!(event = "core.api.request_started", url = %url);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_connect() {
                ApiError::Connection(format!("Cannot connect to {}", self.base_url))
            } else {
                ApiError::Http(e)
            }
        })?;

        response
            .error_for_status()?
            .json::<R>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl NotebookApi for PortalClient {
    async fn status(&self, notebook_id: &str) -> Result<StatusResponse, ApiError> {
        let url = self.endpoint(&["jupyter", "status", notebook_id])?;
        self.get_json(url).await
    }

    async fn remove(&self, notebook_id: &str) -> Result<RemovalResponse, ApiError> {
        let url = self.endpoint(&["jupyter", "remove", notebook_id])?;
        self.get_json(url).await
    }

    async fn list_notebooks(&self) -> Result<Vec<NotebookSummary>, ApiError> {
        let url = self.endpoint(&["jupyterlab", "get_notebooks"])?;
        let listing: NotebookListResponse = self.get_json(url).await?;
        Ok(listing.notebooks)
    }
}
