use crate::config::types::NbWatchConfig;
use crate::errors::ConfigError;

/// Validate a merged configuration.
pub fn validate_config(config: &NbWatchConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.portal.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::InvalidPortalUrl { url: url.clone() });
    }

    if config.portal.request_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "portal.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.polling.interval_ms() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "polling.interval_ms must be greater than 0".to_string(),
        });
    }

    if config.polling.removal_interval_ms() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "polling.removal_interval_ms must be greater than 0".to_string(),
        });
    }

    if config.polling.max_attempts() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "polling.max_attempts must be at least 1".to_string(),
        });
    }

    Ok(())
}
