//! # Configuration System
//!
//! Hierarchical TOML configuration for nbwatch.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - 5s polling, 10s after removal, 30 attempts
//! 2. **User config** - `~/.nbwatch/config.toml`
//! 3. **Project config** - `./.nbwatch/config.toml`
//! 4. **Environment** - `NBWATCH_PORTAL_URL`
//! 5. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use nbwatch_core::config::NbWatchConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NbWatchConfig::load_hierarchy()?;
//!     let cadence = config.polling_cadence();
//!     println!("polling every {:?}", cadence.interval);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{NbWatchConfig, PollingConfig, PortalConfig};
pub use validation::validate_config;

use crate::controller::PollingCadence;
use crate::errors::ConfigError;

impl NbWatchConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Cadence the list controller should poll with.
    pub fn polling_cadence(&self) -> PollingCadence {
        PollingCadence {
            interval: self.polling.interval(),
            removal_interval: self.polling.removal_interval(),
            max_attempts: self.polling.max_attempts(),
        }
    }
}
