use crate::errors::NbWatchError;

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Polling interval for notebook '{notebook_id}' must be greater than zero")]
    ZeroInterval { notebook_id: String },

    #[error("Attempt budget for notebook '{notebook_id}' must be at least 1")]
    ZeroAttempts { notebook_id: String },
}

impl NbWatchError for PollError {
    fn error_code(&self) -> &'static str {
        match self {
            PollError::ZeroInterval { .. } => "POLL_ZERO_INTERVAL",
            PollError::ZeroAttempts { .. } => "POLL_ZERO_ATTEMPTS",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
