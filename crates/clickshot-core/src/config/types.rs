use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use crate::capture::CaptureTarget;
use crate::matching::MatchConfig;
use crate::region::{ElementConfig, Region, RegionSet};
use crate::session::DEFAULT_CLICK_TIMEOUT_MS;
use crate::wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};

/// Default directory for reference images, relative to the working directory
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Top-level configuration, deserialized from `clickshot.toml`.
///
/// Every setting is optional so partial files can be layered; accessors fall
/// back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickshotConfig {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub wait: WaitSettings,
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchingSettings {
    pub threshold: Option<f64>,
    pub tolerance_px: Option<u32>,
    pub search_margin_px: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitSettings {
    /// How long `eventually_visible` and `wait` poll, in milliseconds
    pub timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    /// How long `click` waits for its element, in milliseconds
    pub click_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    pub images_dir: Option<PathBuf>,
    /// Where the searched area of failed checks is saved. Unset disables saving.
    pub failure_dir: Option<PathBuf>,
}

/// A region as written in the config file.
///
/// The screen area is chosen by `window` (title), `app`, both, or `monitor`
/// (index). With none of them the primary monitor is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<usize>,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

impl MatchingSettings {
    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(MatchConfig::default().threshold)
    }

    pub fn tolerance_px(&self) -> u32 {
        self.tolerance_px
            .unwrap_or(MatchConfig::default().tolerance_px)
    }

    pub fn search_margin_px(&self) -> u32 {
        self.search_margin_px
            .unwrap_or(MatchConfig::default().search_margin_px)
    }
}

impl WaitSettings {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
            .unwrap_or(DEFAULT_TIMEOUT.as_millis() as u64)
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
            .unwrap_or(DEFAULT_POLL_INTERVAL.as_millis() as u64)
    }

    pub fn click_timeout_ms(&self) -> u64 {
        self.click_timeout_ms.unwrap_or(DEFAULT_CLICK_TIMEOUT_MS)
    }
}

impl RegionSpec {
    /// Resolve the capture target from `window`, `app` and `monitor`
    pub fn target(&self) -> Result<CaptureTarget, ConfigError> {
        match (&self.app, &self.window, self.monitor) {
            (None, None, None) => Ok(CaptureTarget::PrimaryMonitor),
            (None, None, Some(index)) => Ok(CaptureTarget::monitor(index)),
            (Some(app), None, None) => Ok(CaptureTarget::app(app)),
            (None, Some(title), None) => Ok(CaptureTarget::window(title)),
            (Some(app), Some(title), None) => Ok(CaptureTarget::app_and_window(app, title)),
            (_, _, Some(_)) => Err(ConfigError::InvalidRegion {
                region: self.name.clone(),
                message: "'monitor' cannot be combined with 'window' or 'app'".to_string(),
            }),
        }
    }

    /// Build the configured [`Region`], checking element names and rectangles
    pub fn to_region(&self) -> Result<Region, ConfigError> {
        let region = Region::new(&self.name, self.target()?).configure(self.elements.clone())?;
        Ok(region)
    }
}

impl ClickshotConfig {
    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::default()
            .with_threshold(self.matching.threshold())
            .with_tolerance(self.matching.tolerance_px())
            .with_search_margin(self.matching.search_margin_px())
    }

    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::from_millis(self.wait.timeout_ms(), self.wait.poll_interval_ms())
    }

    pub fn click_wait_config(&self) -> WaitConfig {
        WaitConfig::from_millis(self.wait.click_timeout_ms(), self.wait.poll_interval_ms())
    }

    pub fn images_dir(&self) -> PathBuf {
        self.paths
            .images_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR))
    }

    pub fn failure_dir(&self) -> Option<PathBuf> {
        self.paths.failure_dir.clone()
    }

    /// Build every configured region
    pub fn region_set(&self) -> Result<RegionSet, ConfigError> {
        let regions = self
            .regions
            .iter()
            .map(RegionSpec::to_region)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RegionSet::from_regions(regions)?)
    }
}
