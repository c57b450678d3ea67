use std::path::{Path, PathBuf};

use clap::ArgMatches;
use clickshot_core::config::ClickshotConfig;
use clickshot_core::events;
use clickshot_core::matchers::AssertionResult;
use clickshot_core::{ClickshotError, RegionSet, Session, SessionBuilder, StaticScreen};
use tracing::error;

mod capture;
mod check;
mod click;
mod regions;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);

    match matches.subcommand() {
        Some(("regions", sub_matches)) => regions::handle_regions_command(sub_matches, config_path),
        Some(("capture", sub_matches)) => capture::handle_capture_command(sub_matches, config_path),
        Some(("check", sub_matches)) => check::handle_check_command(sub_matches, config_path),
        Some(("wait", sub_matches)) => check::handle_wait_command(sub_matches, config_path),
        Some(("click", sub_matches)) => click::handle_click_command(sub_matches, config_path),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

/// Load the configuration and build its regions, reporting failures to the user
pub(crate) fn load_regions(
    config_path: Option<&Path>,
) -> Result<(ClickshotConfig, RegionSet), Box<dyn std::error::Error>> {
    let loaded = ClickshotConfig::load(config_path)
        .and_then(|config| config.region_set().map(|regions| (config, regions)));

    match loaded {
        Ok(loaded) => Ok(loaded),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            error!(event = "cli.config_load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Print a library error for the user and log it
pub(crate) fn report_error<E: ClickshotError>(context: &str, error: E) -> Box<dyn std::error::Error> {
    eprintln!("{}: {}", context, error);
    events::log_app_error(&error);
    error.into()
}

/// Build a session from the configuration, applying command-line overrides
pub(crate) fn build_session(
    config: &ClickshotConfig,
    threshold: Option<f64>,
    from_image: Option<&Path>,
) -> Result<Session, Box<dyn std::error::Error>> {
    let mut match_config = config.match_config();
    if let Some(threshold) = threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(format!("--threshold must be between 0.0 and 1.0, got {}", threshold).into());
        }
        match_config = match_config.with_threshold(threshold);
    }

    let mut builder = SessionBuilder::from_config(config).match_config(match_config);
    if let Some(path) = from_image {
        let screen = StaticScreen::from_file(path).inspect_err(|e| {
            eprintln!("Failed to load screenshot: {}", e);
            error!(event = "cli.screenshot_load_failed", error = %e);
            events::log_app_error(e);
        })?;
        builder = builder.screen(screen);
    }
    Ok(builder.build())
}

/// Print an assertion result and exit with code 1 if it failed
pub(crate) fn report_assertion(
    result: &AssertionResult,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let status = match result.passed {
            true => "PASS",
            false => "FAIL",
        };
        println!("Assertion: {}", status);
        println!("  {}", result.message);
    }

    if !result.passed {
        use std::io::Write;
        let _ = std::io::stdout().flush();
        std::process::exit(1);
    }
    Ok(())
}
