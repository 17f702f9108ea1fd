use clap::ArgMatches;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use nbwatch_core::events;
use nbwatch_core::{NbWatchConfig, NbWatchError, NotebookListController, PortalClient, Renderer};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> NbWatchConfig {
    match NbWatchConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.nbwatch/config.toml and ./.nbwatch/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                error_code = e.error_code(),
                "Config load failed, using defaults"
            );
            NbWatchConfig::default()
        }
    }
}

/// Resolve the effective configuration and build a portal client from it.
///
/// `--portal` wins over every config source.
pub fn portal_client(
    matches: &ArgMatches,
) -> Result<(PortalClient, NbWatchConfig), Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();

    if let Some(portal) = matches.get_one::<String>("portal") {
        config.portal.base_url = Some(portal.clone());
    }

    if let Err(e) = config.validate() {
        eprintln!("❌ Invalid configuration: {}", e);
        events::log_app_error(&e);
        return Err(e.into());
    }

    match PortalClient::from_config(&config.portal) {
        Ok(client) => {
            info!(event = "cli.portal.resolved", base_url = %client.base_url());
            Ok((client, config))
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn runtime() -> Result<Runtime, Box<dyn std::error::Error>> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Apply poll events until every notebook settles or the user hits Ctrl-C.
///
/// Returns false when interrupted.
pub async fn follow<R: Renderer>(controller: &mut NotebookListController<R>) -> bool {
    let settled = tokio::select! {
        _ = controller.run_until_settled() => true,
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(event = "cli.signal.listen_failed", error = %e);
            }
            false
        }
    };

    if !settled {
        controller.shutdown();
    }
    events::log_app_shutdown(!settled);
    settled
}
