use crate::errors::NbWatchError;

/// Errors that can occur when talking to the notebook portal.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid portal URL: {0}")]
    InvalidUrl(String),

    #[error("No portal URL configured. Set portal.base_url, NBWATCH_PORTAL_URL or --portal")]
    NotConfigured,
}

impl NbWatchError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Http(_) => "API_HTTP_ERROR",
            ApiError::Connection(_) => "API_CONNECTION_FAILED",
            ApiError::Parse(_) => "API_PARSE_ERROR",
            ApiError::InvalidUrl(_) => "API_INVALID_URL",
            ApiError::NotConfigured => "API_NOT_CONFIGURED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ApiError::InvalidUrl(_) | ApiError::NotConfigured)
    }
}
