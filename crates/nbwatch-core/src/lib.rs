//! nbwatch-core: client-side status tracking for hosted notebooks
//!
//! Keeps a list of a user's notebooks in step with the portal: rows that are
//! still starting are polled until they come up or disappear, and removals
//! are followed until the portal stops reporting the notebook.
//!
//! # Main Entry Points
//!
//! - [`controller`] - The notebook list and its removal flow
//! - [`poller`] - Bounded per-notebook status polling
//! - [`api`] - Portal endpoints and the HTTP client
//! - [`render`] - Output surface implemented by front ends
//! - [`config`] - Configuration management

pub mod api;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod logging;
pub mod notebooks;
pub mod poller;
pub mod render;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types at crate root for convenience
pub use api::{ApiError, NotebookApi, NotebookSummary, PortalClient};
pub use config::NbWatchConfig;
pub use controller::{NotebookListController, PollingCadence, RemovalOutcome};
pub use errors::{ConfigError, NbWatchError};
pub use notebooks::{NotebookError, NotebookStatus, TrackedNotebook};
pub use poller::{PollError, PollMode, StatusPoller};
pub use render::Renderer;

// Re-export logging initialization
pub use logging::init_logging;
