//! Wire types for the portal endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::notebooks::{NOT_FOUND_LABEL, READY_LABEL, TrackedNotebook};

/// Body of `GET /jupyter/status/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            url: None,
        }
    }

    pub fn ready(url: impl Into<String>) -> Self {
        Self {
            status: READY_LABEL.to_string(),
            url: Some(url.into()),
        }
    }
}

/// Body of `GET /jupyter/remove/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `GET /jupyterlab/get_notebooks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotebookListResponse {
    #[serde(default)]
    pub notebooks: Vec<NotebookSummary>,
}

/// One notebook as reported by the listing endpoint.
///
/// The portal fills fields best-effort, so everything except the id may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hours_remaining: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<NotebookSummary> for TrackedNotebook {
    fn from(summary: NotebookSummary) -> Self {
        let mut row = TrackedNotebook::new(summary.id, summary.status);
        if let Some(name) = summary.name.filter(|n| !n.is_empty()) {
            row = row.with_name(name);
        }
        if let Some(url) = summary.url {
            row = row.with_access_url(url);
        }
        row
    }
}

/// Classified outcome of one status query.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusReport {
    Ready { url: Option<String> },
    NotFound,
    InProgress(String),
    TransportError(String),
}

impl StatusReport {
    pub fn from_result(result: Result<StatusResponse, ApiError>) -> Self {
        match result {
            Ok(response) => Self::from(response),
            Err(e) => StatusReport::TransportError(e.to_string()),
        }
    }
}

impl From<StatusResponse> for StatusReport {
    fn from(response: StatusResponse) -> Self {
        match response.status.as_str() {
            NOT_FOUND_LABEL => StatusReport::NotFound,
            READY_LABEL => StatusReport::Ready { url: response.url },
            _ => StatusReport::InProgress(response.status),
        }
    }
}
