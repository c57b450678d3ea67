use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ArgMatches;
use clickshot_core::events;
use clickshot_core::matchers::{Matcher, eventually_visible_within, visible};
use tracing::{error, info};

use super::{build_session, load_regions, report_assertion, report_error};

pub fn handle_check_command(
    matches: &ArgMatches,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("element")
        .ok_or("element is required")?;
    let json_output = matches.get_flag("json");
    let threshold = matches.get_one::<f64>("threshold").copied();
    let from_image = matches.get_one::<PathBuf>("from-image");

    info!(
        event = "cli.check_started",
        element = %path,
        threshold = ?threshold,
        from_image = ?from_image
    );

    let (config, regions) = load_regions(config_path)?;
    let (region, element) = regions
        .resolve(path)
        .map_err(|e| report_error("Unknown element", e))?;
    let session = build_session(&config, threshold, from_image.map(PathBuf::as_path))?;
    let handle = session
        .element(region, element.name())
        .map_err(|e| report_error("Unknown element", e))?;

    match visible().check(&handle) {
        Ok(result) => {
            info!(event = "cli.check_completed", passed = result.passed);
            report_assertion(&result, json_output)
        }
        Err(e) => {
            eprintln!("Check error: {}", e);
            error!(event = "cli.check_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn handle_wait_command(
    matches: &ArgMatches,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = matches
        .get_one::<String>("element")
        .ok_or("element is required")?;
    let json_output = matches.get_flag("json");
    let threshold = matches.get_one::<f64>("threshold").copied();
    let timeout_ms = matches.get_one::<u64>("timeout").copied();

    let (config, regions) = load_regions(config_path)?;
    let (region, element) = regions
        .resolve(path)
        .map_err(|e| report_error("Unknown element", e))?;
    let session = build_session(&config, threshold, None)?;
    let handle = session
        .element(region, element.name())
        .map_err(|e| report_error("Unknown element", e))?;

    let mut wait = *session.wait_config();
    if let Some(timeout_ms) = timeout_ms {
        wait = wait.with_timeout(Duration::from_millis(timeout_ms));
    }

    info!(
        event = "cli.wait_started",
        element = %path,
        timeout_ms = wait.timeout().as_millis() as u64,
        poll_interval_ms = wait.poll_interval().as_millis() as u64
    );

    match eventually_visible_within(wait.timeout(), wait.poll_interval()).check(&handle) {
        Ok(result) => {
            info!(event = "cli.wait_completed", passed = result.passed);
            report_assertion(&result, json_output)
        }
        Err(e) => {
            eprintln!("Wait error: {}", e);
            error!(event = "cli.wait_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
