//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.nbwatch/config.toml`
//! 3. **Project config** - `./.nbwatch/config.toml`
//! 4. **Environment** - `NBWATCH_PORTAL_URL`
//! 5. **CLI arguments** - Command-line flags (highest priority, applied by the caller)

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::types::{NbWatchConfig, PollingConfig, PortalConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Environment variable overriding `portal.base_url`.
pub const PORTAL_URL_ENV: &str = "NBWATCH_PORTAL_URL";

const CONFIG_DIR: &str = ".nbwatch";
const CONFIG_FILE: &str = "config.toml";

fn is_file_not_found(e: &ConfigError) -> bool {
    matches!(e, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<NbWatchConfig, ConfigError> {
    let mut config = NbWatchConfig::default();

    if let Some(home_dir) = dirs::home_dir() {
        match load_config_file(&home_dir.join(CONFIG_DIR).join(CONFIG_FILE)) {
            Ok(user_config) => config = merge_configs(config, user_config),
            Err(e) if !is_file_not_found(&e) => return Err(e),
            Err(_) => debug!(event = "core.config.user_config_missing"),
        }
    }

    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    match load_config_file(&project_path) {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(&e) => return Err(e),
        Err(_) => debug!(event = "core.config.project_config_missing"),
    }

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<NbWatchConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Apply environment overrides using the given lookup.
pub fn apply_env_overrides<F>(mut config: NbWatchConfig, lookup: F) -> NbWatchConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(PORTAL_URL_ENV).filter(|url| !url.trim().is_empty()) {
        config.portal.base_url = Some(url);
    }
    config
}

/// Merge two configurations, with override_config taking precedence.
///
/// Every field is optional, so override values replace base values only if present.
pub fn merge_configs(base: NbWatchConfig, override_config: NbWatchConfig) -> NbWatchConfig {
    NbWatchConfig {
        portal: PortalConfig {
            base_url: override_config.portal.base_url.or(base.portal.base_url),
            request_timeout_secs: override_config
                .portal
                .request_timeout_secs
                .or(base.portal.request_timeout_secs),
        },
        polling: PollingConfig {
            interval_ms: override_config
                .polling
                .interval_ms
                .or(base.polling.interval_ms),
            removal_interval_ms: override_config
                .polling
                .removal_interval_ms
                .or(base.polling.removal_interval_ms),
            max_attempts: override_config
                .polling
                .max_attempts
                .or(base.polling.max_attempts),
        },
    }
}
