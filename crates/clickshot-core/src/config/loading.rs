//! Configuration loading and merging.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.clickshot/config.toml`
//! 3. **Project config** - `./clickshot.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! An explicit `--config` file replaces steps 2 and 3.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::errors::ConfigError;
use super::types::{
    ClickshotConfig, MatchingSettings, PathSettings, RegionSpec, WaitSettings,
};
use super::validation::validate_config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "clickshot.toml";

/// `~/.clickshot/config.toml`, if a home directory is known
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".clickshot").join("config.toml"))
}

/// `./clickshot.toml` in the current working directory
pub fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
}

/// Load `explicit` if given, otherwise the user/project hierarchy.
///
/// # Errors
///
/// An explicit file that does not exist is an error; missing hierarchy files
/// are skipped. Parse and validation errors always fail.
pub fn load(explicit: Option<&Path>) -> Result<ClickshotConfig, ConfigError> {
    match explicit {
        Some(path) => {
            let config = load_file(path)?;
            validate_config(&config)?;
            info!(
                event = "core.config.load_completed",
                source = %path.display(),
                region_count = config.regions.len()
            );
            Ok(config)
        }
        None => load_hierarchy(),
    }
}

/// Load and merge the user and project config files over the defaults.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be read or parsed, or if the
/// merged configuration fails validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<ClickshotConfig, ConfigError> {
    let layers: Vec<PathBuf> = [user_config_path(), project_config_path()]
        .into_iter()
        .flatten()
        .collect();
    load_layers(&layers)
}

fn load_layers(paths: &[PathBuf]) -> Result<ClickshotConfig, ConfigError> {
    let mut config = ClickshotConfig::default();

    for path in paths {
        match load_file(path) {
            Ok(layer) => {
                debug!(event = "core.config.layer_loaded", path = %path.display());
                config = merge_configs(config, layer);
            }
            Err(ConfigError::NotFound { .. }) => {
                debug!(event = "core.config.layer_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;
    info!(
        event = "core.config.load_completed",
        source = "hierarchy",
        region_count = config.regions.len()
    );
    Ok(config)
}

/// Read and parse one config file without validating it.
///
/// Relative `paths.images_dir` and `paths.failure_dir` are resolved against
/// the directory containing the file.
pub fn load_file(path: &Path) -> Result<ClickshotConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut config: ClickshotConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(base) = path.parent() {
        config.paths.images_dir = config.paths.images_dir.map(|dir| base.join(dir));
        config.paths.failure_dir = config.paths.failure_dir.map(|dir| base.join(dir));
    }
    Ok(config)
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Settings are replaced only when the override sets them. Regions are merged
/// by name: an override region replaces the base region of the same name,
/// new regions are appended.
pub fn merge_configs(base: ClickshotConfig, override_config: ClickshotConfig) -> ClickshotConfig {
    ClickshotConfig {
        matching: MatchingSettings {
            threshold: override_config
                .matching
                .threshold
                .or(base.matching.threshold),
            tolerance_px: override_config
                .matching
                .tolerance_px
                .or(base.matching.tolerance_px),
            search_margin_px: override_config
                .matching
                .search_margin_px
                .or(base.matching.search_margin_px),
        },
        wait: WaitSettings {
            timeout_ms: override_config.wait.timeout_ms.or(base.wait.timeout_ms),
            poll_interval_ms: override_config
                .wait
                .poll_interval_ms
                .or(base.wait.poll_interval_ms),
            click_timeout_ms: override_config
                .wait
                .click_timeout_ms
                .or(base.wait.click_timeout_ms),
        },
        paths: PathSettings {
            images_dir: override_config.paths.images_dir.or(base.paths.images_dir),
            failure_dir: override_config.paths.failure_dir.or(base.paths.failure_dir),
        },
        regions: merge_regions(base.regions, override_config.regions),
    }
}

fn merge_regions(base: Vec<RegionSpec>, overrides: Vec<RegionSpec>) -> Vec<RegionSpec> {
    let mut merged = base;
    for region in overrides {
        match merged.iter_mut().find(|r| r.name == region.name) {
            Some(existing) => *existing = region,
            None => merged.push(region),
        }
    }
    merged
}
