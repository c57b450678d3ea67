use std::path::Path;

use clap::ArgMatches;
use clickshot_core::ClickModifier;
use clickshot_core::events;
use tracing::{error, info};

use super::{build_session, load_regions, report_error};

/// Parse click modifier from --right/--double flags and return (modifier, user-facing label)
fn parse_click_modifier(matches: &ArgMatches) -> (ClickModifier, &'static str) {
    if matches.get_flag("right") {
        (ClickModifier::Right, "Right-clicked")
    } else if matches.get_flag("double") {
        (ClickModifier::Double, "Double-clicked")
    } else {
        (ClickModifier::None, "Clicked")
    }
}

pub fn handle_click_command(
    matches: &ArgMatches,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("element")
        .ok_or("element is required")?;
    let json_output = matches.get_flag("json");
    let (modifier, label) = parse_click_modifier(matches);

    info!(event = "cli.click_started", element = %path, modifier = ?modifier);

    let (config, regions) = load_regions(config_path)?;
    let (region, element) = regions
        .resolve(path)
        .map_err(|e| report_error("Unknown element", e))?;
    let session = build_session(&config, None, None)?;
    let handle = session
        .element(region, element.name())
        .map_err(|e| report_error("Unknown element", e))?;

    match handle.click_with(modifier) {
        Ok(result) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} {}", label, path);
                if let Some(details) = &result.details {
                    if let Some(rect) = details.get("rect") {
                        println!("  Matched: {}", rect);
                    }
                    if let (Some(sx), Some(sy)) = (details.get("screen_x"), details.get("screen_y"))
                    {
                        println!("  Screen: ({}, {})", sx, sy);
                    }
                }
            }

            info!(event = "cli.click_completed", element = %path, modifier = ?modifier);
            Ok(())
        }
        Err(e) => {
            eprintln!("Click failed: {}", e);
            error!(event = "cli.click_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
