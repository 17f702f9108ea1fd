use clap::ArgMatches;
use tracing::{error, info};

use nbwatch_core::events;
use nbwatch_core::{NotebookApi, NotebookSummary};

use super::helpers;
use crate::renderer::EMPTY_PLACEHOLDER;
use crate::table::TableFormatter;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_started", json_output = json_output);

    let (client, _config) = helpers::portal_client(matches)?;
    let runtime = helpers::runtime()?;

    match runtime.block_on(client.list_notebooks()) {
        Ok(notebooks) => {
            print_notebooks(&notebooks, json_output)?;
            info!(event = "cli.list_completed", count = notebooks.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to list notebooks: {}", e);

            error!(
                event = "cli.list_failed",
                error = %e
            );

            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn print_notebooks(
    notebooks: &[NotebookSummary],
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", notebooks_json(notebooks)?);
    } else if notebooks.is_empty() {
        println!("{}", EMPTY_PLACEHOLDER);
    } else {
        println!("Your notebooks:");
        TableFormatter::new(notebooks).print_table(notebooks);
    }
    Ok(())
}

fn notebooks_json(notebooks: &[NotebookSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(notebooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_keeps_portal_fields() {
        let notebooks = vec![NotebookSummary {
            id: "nb-1".to_string(),
            name: Some("Analysis".to_string()),
            status: "Ready".to_string(),
            owner: Some("alice".to_string()),
            image: None,
            creation_date: None,
            hours_remaining: Some(12),
            url: Some("https://nb-1.example".to_string()),
        }];

        let json = notebooks_json(&notebooks).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["id"], "nb-1");
        assert_eq!(parsed[0]["status"], "Ready");
        assert_eq!(parsed[0]["hours_remaining"], 12);
    }

    #[test]
    fn test_json_output_for_empty_listing() {
        assert_eq!(notebooks_json(&[]).unwrap(), "[]");
    }
}
