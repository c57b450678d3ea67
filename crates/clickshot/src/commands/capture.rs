use std::path::{Path, PathBuf};

use clap::ArgMatches;
use clickshot_core::capture::{ScreenSource, native_screen, save_capture};
use clickshot_core::events;
use tracing::{error, info};

use super::{load_regions, report_error};

pub fn handle_capture_command(
    matches: &ArgMatches,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let region_name = matches
        .get_one::<String>("region")
        .ok_or("--region is required")?;
    let output_path = matches
        .get_one::<PathBuf>("output")
        .ok_or("--output is required")?;

    info!(
        event = "cli.capture_started",
        region = %region_name,
        output = %output_path.display()
    );

    let (_, regions) = load_regions(config_path)?;
    let region = regions
        .region(region_name)
        .map_err(|e| report_error("Unknown region", e))?;

    let result = native_screen()
        .capture(region.target())
        .and_then(|capture| save_capture(&capture, output_path).map(|()| capture));

    match result {
        Ok(capture) => {
            println!("Capture saved: {}", output_path.display());
            println!("  Region: {} ({})", region.name(), region.target());
            println!("  Size: {}x{}", capture.width(), capture.height());

            info!(
                event = "cli.capture_completed",
                width = capture.width(),
                height = capture.height()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Capture failed: {}", e);
            error!(event = "cli.capture_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
