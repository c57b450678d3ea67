//! Configuration validation.
//!
//! Runs on the merged configuration so a value from one layer can be fixed by
//! a later one.

use std::collections::HashSet;

use super::errors::ConfigError;
use super::types::ClickshotConfig;

/// Validate a ClickshotConfig.
///
/// # Validation Rules
///
/// - `matching.threshold`, if set, must be within 0.0 - 1.0
/// - `wait.poll_interval_ms`, if set, must be greater than zero
/// - Region names must be unique
/// - Each region must resolve to a capture target and its elements must be
///   unique with non-empty rectangles
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` for out-of-range settings,
/// `ConfigError::InvalidRegion` for an unresolvable target and
/// `ConfigError::Region` for element and region naming problems.
pub fn validate_config(config: &ClickshotConfig) -> Result<(), ConfigError> {
    if let Some(threshold) = config.matching.threshold
        && !(0.0..=1.0).contains(&threshold)
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("matching.threshold must be between 0.0 and 1.0, got {threshold}"),
        });
    }

    if config.wait.poll_interval_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "wait.poll_interval_ms must be greater than 0".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for spec in &config.regions {
        if spec.name.is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "region name cannot be empty".to_string(),
            });
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(ConfigError::Region(
                crate::region::RegionError::DuplicateRegion {
                    region: spec.name.clone(),
                },
            ));
        }
        spec.to_region()?;
    }

    Ok(())
}
