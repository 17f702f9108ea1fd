//! Notebook list orchestration.
//!
//! [`NotebookListController`] owns the displayed rows and one
//! [`StatusPoller`](crate::poller::StatusPoller) per non-terminal row. Pollers
//! never touch rows: they send [`PollEvent`](crate::poller::PollEvent)s and the
//! controller applies them, checking on every event that it still belongs to
//! the current session.

pub mod list;

use std::time::Duration;

pub use list::{NotebookListController, RemovalOutcome};

use crate::config::defaults::{
    DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_REMOVAL_INTERVAL_MS,
};

/// Cadence and budget for the controller's poll sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingCadence {
    /// Interval while waiting for a notebook to come up.
    pub interval: Duration,
    /// Interval once a removal has been accepted.
    pub removal_interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollingCadence {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            removal_interval: Duration::from_millis(DEFAULT_REMOVAL_INTERVAL_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
