use std::path::Path;

use tracing::{debug, error, info};

use super::errors::CaptureError;
use super::types::{Capture, CaptureTarget};

/// Something that can produce a bitmap of a region's screen area
pub trait ScreenSource: Send + Sync {
    fn capture(&self, target: &CaptureTarget) -> Result<Capture, CaptureError>;
}

/// A screen source that always returns the same bitmap, whatever the target.
///
/// Used to check regions against a saved screenshot instead of the live screen.
#[derive(Debug, Clone)]
pub struct StaticScreen {
    capture: Capture,
}

impl StaticScreen {
    pub fn new(capture: Capture) -> Self {
        Self { capture }
    }

    /// Load a screenshot from disk
    pub fn from_file(path: &Path) -> Result<Self, CaptureError> {
        info!(event = "core.capture.static_load_started", path = %path.display());

        let image = image::open(path).map_err(|e| CaptureError::ImageLoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let image = image.to_rgba8();

        info!(
            event = "core.capture.static_load_completed",
            width = image.width(),
            height = image.height()
        );
        Ok(Self::new(Capture::from_image(image)))
    }
}

impl ScreenSource for StaticScreen {
    fn capture(&self, target: &CaptureTarget) -> Result<Capture, CaptureError> {
        debug!(event = "core.capture.static_served", target = %target);
        Ok(self.capture.clone())
    }
}

/// Screen source for platforms without a capture backend
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedScreen;

impl ScreenSource for UnsupportedScreen {
    fn capture(&self, _target: &CaptureTarget) -> Result<Capture, CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

/// Save a capture as PNG, creating parent directories if they don't exist
pub fn save_capture(capture: &Capture, path: &Path) -> Result<(), CaptureError> {
    info!(event = "core.capture.save_started", path = %path.display());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        debug!(event = "core.capture.creating_parent_directory", path = %parent.display());
        std::fs::create_dir_all(parent).map_err(|source| {
            error!(
                event = "core.capture.directory_creation_failed",
                path = %parent.display(),
                error = %source
            );
            CaptureError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source,
            }
        })?;
    }

    capture
        .image()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| CaptureError::EncodingFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    info!(event = "core.capture.save_completed", path = %path.display());
    Ok(())
}
