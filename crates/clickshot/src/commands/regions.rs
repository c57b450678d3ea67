use std::path::Path;

use clap::ArgMatches;
use tracing::info;

use super::load_regions;
use crate::table;

pub fn handle_regions_command(
    matches: &ArgMatches,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.regions_started", json_output = json_output);

    let (_, regions) = load_regions(config_path)?;
    let listed: Vec<_> = regions.iter().collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&listed)?);
    } else if listed.is_empty() {
        println!("No regions configured.");
    } else {
        println!("Configured regions:");
        table::print_regions_table(&listed);
    }

    info!(event = "cli.regions_completed", count = listed.len());
    Ok(())
}
