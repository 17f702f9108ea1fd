use std::fmt;

use serde::{Deserialize, Serialize};

use crate::notebooks::errors::NotebookError;

/// Status label the portal reports once a notebook is serving.
pub const READY_LABEL: &str = "Ready";
/// Status label the portal reports once a notebook no longer exists.
pub const NOT_FOUND_LABEL: &str = "Not found";
/// Status label shown while a notebook is being torn down.
pub const REMOVING_LABEL: &str = "Removing notebook...";

/// Lifecycle of a tracked notebook.
///
/// ```text
/// Pending ──► Ready
///    │  └───► NotFound
///    ▼
/// Removing ─► Removed
///        └──► NotFound
/// ```
///
/// `Ready` may also move to `Removing`. Nothing moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotebookStatus {
    Pending,
    Ready,
    NotFound,
    Removing,
    Removed,
}

impl NotebookStatus {
    /// Map a portal status label onto a lifecycle state.
    ///
    /// Any label the portal does not reserve ("Starting notebook...", "Pending", ...)
    /// is an in-progress label.
    pub fn from_label(label: &str) -> Self {
        match label {
            READY_LABEL => NotebookStatus::Ready,
            NOT_FOUND_LABEL => NotebookStatus::NotFound,
            REMOVING_LABEL => NotebookStatus::Removing,
            _ => NotebookStatus::Pending,
        }
    }

    /// Whether a user may request removal from this status.
    pub fn is_removable(self) -> bool {
        matches!(self, NotebookStatus::Pending | NotebookStatus::Ready)
    }

    pub fn can_transition_to(self, next: NotebookStatus) -> bool {
        use NotebookStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Pending, Ready)
                | (Pending, NotFound)
                | (Pending, Removing)
                | (Ready, Removing)
                | (Removing, Removing)
                | (Removing, Removed)
                | (Removing, NotFound)
        )
    }
}

impl fmt::Display for NotebookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotebookStatus::Pending => "pending",
            NotebookStatus::Ready => "ready",
            NotebookStatus::NotFound => "not_found",
            NotebookStatus::Removing => "removing",
            NotebookStatus::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// One row of the notebook list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedNotebook {
    pub id: String,
    /// Display name; the portal lower-cases names into ids, so this may differ.
    pub name: String,
    pub status: NotebookStatus,
    /// Last status label rendered for the row.
    pub status_text: String,
    /// Access URL. Only set while the notebook is `Ready`.
    pub url: Option<String>,
    /// URL announced by the listing, used when a Ready status response
    /// carries none.
    pub access_url: Option<String>,
}

impl TrackedNotebook {
    pub fn new(id: impl Into<String>, status_text: impl Into<String>) -> Self {
        let id = id.into();
        let status_text = status_text.into();
        Self {
            name: id.clone(),
            id,
            status: NotebookStatus::from_label(&status_text),
            status_text,
            url: None,
            access_url: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_access_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        if self.status == NotebookStatus::Ready {
            self.url = Some(url.clone());
        }
        self.access_url = Some(url);
        self
    }

    /// Move to `next`, rejecting edges the lifecycle does not allow.
    pub fn advance(&mut self, next: NotebookStatus) -> Result<(), NotebookError> {
        if !self.status.can_transition_to(next) {
            return Err(NotebookError::IllegalTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next != NotebookStatus::Ready {
            self.url = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [NotebookStatus; 5] = [
        NotebookStatus::Pending,
        NotebookStatus::Ready,
        NotebookStatus::NotFound,
        NotebookStatus::Removing,
        NotebookStatus::Removed,
    ];

    #[test]
    fn test_from_label() {
        assert_eq!(NotebookStatus::from_label("Ready"), NotebookStatus::Ready);
        assert_eq!(
            NotebookStatus::from_label("Not found"),
            NotebookStatus::NotFound
        );
        assert_eq!(
            NotebookStatus::from_label("Removing notebook..."),
            NotebookStatus::Removing
        );
        assert_eq!(
            NotebookStatus::from_label("Starting notebook..."),
            NotebookStatus::Pending
        );
        // Labels are matched exactly
        assert_eq!(NotebookStatus::from_label("ready"), NotebookStatus::Pending);
    }

    #[test]
    fn test_terminal_statuses_have_no_outgoing_poll_edges() {
        assert!(!NotebookStatus::NotFound.can_transition_to(NotebookStatus::Pending));
        assert!(!NotebookStatus::Removed.can_transition_to(NotebookStatus::Pending));
        assert!(!NotebookStatus::Ready.can_transition_to(NotebookStatus::Pending));
        assert!(!NotebookStatus::Ready.can_transition_to(NotebookStatus::NotFound));
    }

    #[test]
    fn test_removed_and_not_found_are_absorbing() {
        for next in ALL {
            assert!(!NotebookStatus::Removed.can_transition_to(next));
            assert!(!NotebookStatus::NotFound.can_transition_to(next));
        }
    }

    #[test]
    fn test_removing_cannot_become_ready() {
        assert!(!NotebookStatus::Removing.can_transition_to(NotebookStatus::Ready));
        assert!(!NotebookStatus::Removing.can_transition_to(NotebookStatus::Pending));
        assert!(NotebookStatus::Removing.can_transition_to(NotebookStatus::Removed));
        assert!(NotebookStatus::Removing.can_transition_to(NotebookStatus::NotFound));
    }

    #[test]
    fn test_advance_rejects_backward_move() {
        let mut row = TrackedNotebook::new("nb-1", "Ready");
        let err = row.advance(NotebookStatus::Pending).unwrap_err();
        assert!(matches!(
            err,
            NotebookError::IllegalTransition {
                from: NotebookStatus::Ready,
                to: NotebookStatus::Pending,
                ..
            }
        ));
        assert_eq!(row.status, NotebookStatus::Ready);
    }

    #[test]
    fn test_url_only_kept_while_ready() {
        let mut row = TrackedNotebook::new("nb-1", "Ready").with_access_url("https://nb-1.example");
        assert_eq!(row.url.as_deref(), Some("https://nb-1.example"));

        row.advance(NotebookStatus::Removing).unwrap();
        assert!(row.url.is_none());
        assert_eq!(row.access_url.as_deref(), Some("https://nb-1.example"));
    }

    #[test]
    fn test_pending_row_has_no_url() {
        let row = TrackedNotebook::new("nb-2", "Starting notebook...")
            .with_name("NB-2")
            .with_access_url("https://nb-2.example");
        assert_eq!(row.status, NotebookStatus::Pending);
        assert_eq!(row.name, "NB-2");
        assert!(row.url.is_none());
    }
}
