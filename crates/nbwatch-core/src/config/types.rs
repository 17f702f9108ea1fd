//! Configuration type definitions for nbwatch.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [portal]
//! base_url = "https://portal.example.org"
//! request_timeout_secs = 5
//!
//! [polling]
//! interval_ms = 5000
//! removal_interval_ms = 10000
//! max_attempts = 30
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// This is the primary configuration structure that gets loaded from:
/// 1. User config: `~/.nbwatch/config.toml`
/// 2. Project config: `./.nbwatch/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NbWatchConfig {
    /// Where the notebook portal lives
    #[serde(default)]
    pub portal: PortalConfig,

    /// Polling cadence and retry budget
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Portal connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Base URL of the portal, e.g. `https://portal.example.org`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: 5 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

/// Status polling configuration.
///
/// Unset fields fall back to the accessor defaults, so a project config
/// that only sets `max_attempts` keeps the user's intervals on merge.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PollingConfig {
    /// Interval between status queries for a provisioning notebook.
    /// Default: 5000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,

    /// Interval between status queries after a removal was accepted.
    /// Default: 10000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_interval_ms: Option<u64>,

    /// Number of status queries per session before polling gives up.
    /// Default: 30.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}
