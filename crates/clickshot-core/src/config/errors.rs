use std::path::PathBuf;

use crate::errors::ClickshotError;
use crate::region::RegionError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid region '{region}': {message}")]
    InvalidRegion { region: String, message: String },

    #[error(transparent)]
    Region(#[from] RegionError),
}

impl ClickshotError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NotFound { .. } => "CONFIG_NOT_FOUND",
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "CONFIG_INVALID",
            ConfigError::InvalidRegion { .. } => "CONFIG_INVALID_REGION",
            ConfigError::Region(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, ConfigError::ReadFailed { .. })
    }
}
