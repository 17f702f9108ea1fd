use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, info, warn};

use nbwatch_core::events;
use nbwatch_core::{
    NbWatchConfig, NotebookApi, NotebookError, NotebookListController, PortalClient,
    RemovalOutcome, TrackedNotebook,
};

use super::helpers;
use crate::renderer::TerminalRenderer;

pub(crate) fn handle_remove_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let notebook_id = matches
        .get_one::<String>("notebook")
        .ok_or("Notebook argument is required")?;
    let no_wait = matches.get_flag("no-wait");

    info!(
        event = "cli.remove_started",
        notebook_id = notebook_id.as_str(),
        no_wait = no_wait
    );

    let (client, config) = helpers::portal_client(matches)?;
    helpers::runtime()?.block_on(remove_notebook(client, config, notebook_id, no_wait))
}

async fn remove_notebook(
    client: PortalClient,
    config: NbWatchConfig,
    notebook_id: &str,
    no_wait: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let notebooks = match client.list_notebooks().await {
        Ok(notebooks) => notebooks,
        Err(e) => {
            eprintln!("❌ Failed to list notebooks: {}", e);
            error!(event = "cli.remove_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let Some(row) = notebooks
        .into_iter()
        .find(|n| n.id == notebook_id)
        .map(TrackedNotebook::from)
    else {
        let e = NotebookError::NotTracked {
            id: notebook_id.to_string(),
        };
        eprintln!("❌ {}", e);
        events::log_app_error(&e);
        return Err(e.into());
    };

    // Only the target row is tracked, other notebooks are left alone
    let mut controller = NotebookListController::new(
        Arc::new(client),
        TerminalRenderer::stdout(),
        config.polling_cadence(),
    );
    controller.initialize(vec![row])?;

    match controller.request_removal(notebook_id).await {
        Ok(RemovalOutcome::Accepted { message }) => {
            if let Some(message) = message {
                println!("{}", message);
            }
            info!(event = "cli.remove_accepted", notebook_id = notebook_id);
        }
        Ok(RemovalOutcome::Rejected { message }) => {
            let message =
                message.unwrap_or_else(|| format!("Unable to delete notebook {}", notebook_id));
            eprintln!("❌ Removal rejected: {}", message);
            warn!(
                event = "cli.remove_rejected",
                notebook_id = notebook_id,
                message = message.as_str()
            );
            return Err(message.into());
        }
        Err(e) => {
            eprintln!("❌ Failed to remove '{}': {}", notebook_id, e);
            error!(event = "cli.remove_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    }

    if no_wait {
        controller.shutdown();
        return Ok(());
    }

    let settled = helpers::follow(&mut controller).await;
    if settled && controller.get(notebook_id).is_some() {
        println!(
            "{} is still being removed, run `nbwatch watch` to keep following it",
            notebook_id
        );
    }

    info!(
        event = "cli.remove_completed",
        notebook_id = notebook_id,
        settled = settled
    );
    Ok(())
}
