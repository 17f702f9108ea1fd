//! Scripted portal and recording renderer for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, NotebookApi, NotebookSummary, RemovalResponse, StatusResponse};
use crate::render::Renderer;

/// Portal stand-in answering from per-notebook queues.
///
/// An empty status queue answers "Pending"; an unscripted removal is rejected.
#[derive(Default)]
pub struct ScriptedApi {
    statuses: Mutex<HashMap<String, VecDeque<Result<StatusResponse, ApiError>>>>,
    removals: Mutex<HashMap<String, Result<RemovalResponse, ApiError>>>,
    listing: Mutex<Vec<NotebookSummary>>,
    status_calls: Mutex<HashMap<String, u32>>,
    removal_calls: Mutex<HashMap<String, u32>>,
    latency: Mutex<Duration>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_status(&self, notebook_id: &str, response: Result<StatusResponse, ApiError>) {
        self.statuses
            .lock()
            .unwrap()
            .entry(notebook_id.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn set_removal(&self, notebook_id: &str, response: Result<RemovalResponse, ApiError>) {
        self.removals
            .lock()
            .unwrap()
            .insert(notebook_id.to_string(), response);
    }

    pub fn set_listing(&self, notebooks: Vec<NotebookSummary>) {
        *self.listing.lock().unwrap() = notebooks;
    }

    /// Delay every status answer by `latency` (simulated time).
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn status_calls(&self, notebook_id: &str) -> u32 {
        self.status_calls
            .lock()
            .unwrap()
            .get(notebook_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn removal_calls(&self, notebook_id: &str) -> u32 {
        self.removal_calls
            .lock()
            .unwrap()
            .get(notebook_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl NotebookApi for ScriptedApi {
    async fn status(&self, notebook_id: &str) -> Result<StatusResponse, ApiError> {
        *self
            .status_calls
            .lock()
            .unwrap()
            .entry(notebook_id.to_string())
            .or_default() += 1;

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.statuses
            .lock()
            .unwrap()
            .get_mut(notebook_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(StatusResponse::new("Pending")))
    }

    async fn remove(&self, notebook_id: &str) -> Result<RemovalResponse, ApiError> {
        *self
            .removal_calls
            .lock()
            .unwrap()
            .entry(notebook_id.to_string())
            .or_default() += 1;

        self.removals
            .lock()
            .unwrap()
            .remove(notebook_id)
            .unwrap_or(Ok(RemovalResponse {
                success: false,
                message: Some(format!("Unable to delete notebook {}", notebook_id)),
            }))
    }

    async fn list_notebooks(&self) -> Result<Vec<NotebookSummary>, ApiError> {
        Ok(self.listing.lock().unwrap().clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    StatusText { row_id: String, text: String },
    ReadyLink { row_id: String, url: String, label: String },
    RemoveRow { row_id: String },
    EmptyPlaceholder,
    RemovalPending { row_id: String, label: String },
    PollExhausted { row_id: String, attempts: u32 },
}

/// Renderer that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn status_texts(&self, row_id: &str) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::StatusText { row_id: id, text } if id == row_id => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, call: &RenderCall) -> bool {
        self.calls.contains(call)
    }

    pub fn empty_placeholder_shown(&self) -> bool {
        self.contains(&RenderCall::EmptyPlaceholder)
    }
}

impl Renderer for RecordingRenderer {
    fn render_status_text(&mut self, row_id: &str, text: &str) {
        self.calls.push(RenderCall::StatusText {
            row_id: row_id.to_string(),
            text: text.to_string(),
        });
    }

    fn render_as_ready_link(&mut self, row_id: &str, url: &str, label: &str) {
        self.calls.push(RenderCall::ReadyLink {
            row_id: row_id.to_string(),
            url: url.to_string(),
            label: label.to_string(),
        });
    }

    fn remove_row(&mut self, row_id: &str) {
        self.calls.push(RenderCall::RemoveRow {
            row_id: row_id.to_string(),
        });
    }

    fn render_empty_placeholder(&mut self) {
        self.calls.push(RenderCall::EmptyPlaceholder);
    }

    fn render_removal_pending(&mut self, row_id: &str, label: &str) {
        self.calls.push(RenderCall::RemovalPending {
            row_id: row_id.to_string(),
            label: label.to_string(),
        });
    }

    fn render_poll_exhausted(&mut self, row_id: &str, attempts: u32) {
        self.calls.push(RenderCall::PollExhausted {
            row_id: row_id.to_string(),
            attempts,
        });
    }
}
