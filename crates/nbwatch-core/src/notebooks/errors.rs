use crate::api::ApiError;
use crate::errors::NbWatchError;
use crate::notebooks::types::NotebookStatus;
use crate::poller::PollError;

#[derive(Debug, thiserror::Error)]
pub enum NotebookError {
    #[error("Notebook '{id}' is not in the list")]
    NotTracked { id: String },

    #[error("Notebook '{id}' cannot be removed while {status}")]
    NotRemovable { id: String, status: NotebookStatus },

    #[error("Notebook '{id}' cannot move from {from} to {to}")]
    IllegalTransition {
        id: String,
        from: NotebookStatus,
        to: NotebookStatus,
    },

    #[error("Removal request for notebook '{id}' failed: {source}")]
    RemovalRequestFailed {
        id: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to start polling: {source}")]
    PollError {
        #[from]
        source: PollError,
    },
}

impl NbWatchError for NotebookError {
    fn error_code(&self) -> &'static str {
        match self {
            NotebookError::NotTracked { .. } => "NOTEBOOK_NOT_TRACKED",
            NotebookError::NotRemovable { .. } => "NOTEBOOK_NOT_REMOVABLE",
            NotebookError::IllegalTransition { .. } => "NOTEBOOK_ILLEGAL_TRANSITION",
            NotebookError::RemovalRequestFailed { .. } => "NOTEBOOK_REMOVAL_FAILED",
            NotebookError::PollError { .. } => "NOTEBOOK_POLL_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            NotebookError::NotTracked { .. } | NotebookError::NotRemovable { .. }
        )
    }
}
