use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("nbwatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Follow hosted notebooks from start-up to removal")
        .long_about("nbwatch lists the notebooks you own on the portal, polls the ones that are still starting until they are ready or gone, and removes notebooks while following the teardown until the portal no longer reports them.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("portal")
                .long("portal")
                .help("Portal base URL (overrides config and NBWATCH_PORTAL_URL)")
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List your notebooks and their current status")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("watch")
                .about("Poll notebooks that are still starting until they are ready or gone")
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a notebook and follow the teardown")
                .arg(
                    Arg::new("notebook")
                        .help("Id of the notebook to remove")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("no-wait")
                        .long("no-wait")
                        .help("Return once the portal accepts the removal")
                        .action(ArgAction::SetTrue)
                )
        )
}
