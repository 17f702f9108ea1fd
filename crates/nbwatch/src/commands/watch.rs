use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info};

use nbwatch_core::events;
use nbwatch_core::{
    NbWatchConfig, NotebookApi, NotebookListController, PortalClient, TrackedNotebook,
};

use super::helpers;
use crate::renderer::TerminalRenderer;

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.watch_started");

    let (client, config) = helpers::portal_client(matches)?;
    helpers::runtime()?.block_on(watch_notebooks(client, config))
}

async fn watch_notebooks(
    client: PortalClient,
    config: NbWatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebooks = match client.list_notebooks().await {
        Ok(notebooks) => notebooks,
        Err(e) => {
            eprintln!("❌ Failed to list notebooks: {}", e);
            error!(event = "cli.watch_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };
    let rows: Vec<TrackedNotebook> = notebooks.into_iter().map(TrackedNotebook::from).collect();

    let mut controller = NotebookListController::new(
        Arc::new(client),
        TerminalRenderer::stdout(),
        config.polling_cadence(),
    );
    controller.initialize(rows)?;

    let settled = helpers::follow(&mut controller).await;

    info!(
        event = "cli.watch_completed",
        settled = settled,
        remaining = controller.rows().len()
    );
    Ok(())
}
