//! Portal API contract.
//!
//! The poller and controller only see [`NotebookApi`]; [`PortalClient`] is
//! the HTTP implementation used by the CLI, tests use scripted stand-ins.

pub mod client;
pub mod errors;
pub mod types;

use async_trait::async_trait;

pub use client::PortalClient;
pub use errors::ApiError;
pub use types::{
    NotebookListResponse, NotebookSummary, RemovalResponse, StatusReport, StatusResponse,
};

#[async_trait]
pub trait NotebookApi: Send + Sync {
    /// Current status of one notebook.
    async fn status(&self, notebook_id: &str) -> Result<StatusResponse, ApiError>;

    /// Ask the portal to tear a notebook down.
    async fn remove(&self, notebook_id: &str) -> Result<RemovalResponse, ApiError>;

    /// Notebooks owned by the current user.
    async fn list_notebooks(&self) -> Result<Vec<NotebookSummary>, ApiError>;
}
