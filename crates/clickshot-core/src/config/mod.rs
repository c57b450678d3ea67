//! TOML configuration: matching and wait settings, paths and region definitions.

mod errors;
mod loading;
mod types;
mod validation;

pub use errors::ConfigError;
pub use loading::{load, load_file, load_hierarchy, merge_configs, project_config_path, user_config_path};
pub use types::{ClickshotConfig, MatchingSettings, PathSettings, RegionSpec, WaitSettings};
pub use validation::validate_config;

impl ClickshotConfig {
    /// Load configuration from an explicit file, or from the user/project
    /// hierarchy when `explicit` is `None`.
    ///
    /// See [`loading::load`] for details.
    pub fn load(explicit: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        loading::load(explicit)
    }

    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }
}
