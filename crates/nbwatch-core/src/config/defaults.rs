//! Default values for configuration types.

use std::time::Duration;

use crate::config::types::{PollingConfig, PortalConfig};

/// Default cadence for provisioning notebooks (5s).
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

/// Default cadence once a removal has been accepted (10s).
///
/// Teardown takes longer than provisioning on the portal side, so the
/// removal poller backs off.
pub const DEFAULT_REMOVAL_INTERVAL_MS: u64 = 10_000;

/// Default status query budget per session (30).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default HTTP timeout for portal requests (5s).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

impl PollingConfig {
    /// Returns the provisioning interval in milliseconds, defaulting to 5000.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS)
    }

    /// Returns the removal interval in milliseconds, defaulting to 10000.
    pub fn removal_interval_ms(&self) -> u64 {
        self.removal_interval_ms
            .unwrap_or(DEFAULT_REMOVAL_INTERVAL_MS)
    }

    /// Returns the attempt budget, defaulting to 30.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn removal_interval(&self) -> Duration {
        Duration::from_millis(self.removal_interval_ms())
    }
}

impl PortalConfig {
    /// Returns the request timeout, defaulting to 5 seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}
