use tracing::{error, info, warn};

use crate::errors::NbWatchError;

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_app_shutdown(interrupted: bool) {
    info!(event = "core.app.shutdown_started", interrupted = interrupted);
}

/// Log a failed operation at the level its kind deserves.
///
/// User errors (unknown notebook, bad config) are warnings; everything else
/// is an error.
pub fn log_app_error(error: &dyn NbWatchError) {
    if error.is_user_error() {
        warn!(
            event = "core.app.user_error",
            error = %error,
            error_code = error.error_code()
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error = %error,
            error_code = error.error_code()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;
    use crate::notebooks::NotebookError;

    #[test]
    fn test_app_events() {
        // Event functions must not panic without a subscriber
        log_app_startup();
        log_app_shutdown(true);

        log_app_error(&NotebookError::NotTracked {
            id: "nb-1".to_string(),
        });
        log_app_error(&ConfigError::IoError {
            source: std::io::Error::other("test"),
        });
    }
}
