use crate::errors::ClickshotError;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Window not found: '{title}'")]
    WindowNotFound { title: String },

    #[error("Window not found for app: '{app}'")]
    WindowNotFoundByApp { app: String },

    #[error("Window '{title}' in app '{app}' not found")]
    WindowNotFoundByAppAndTitle { app: String, title: String },

    #[error("Window is minimized and cannot be captured: '{title}'")]
    WindowMinimized { title: String },

    #[error("Monitor not found at index: {index}")]
    MonitorNotFound { index: usize },

    #[error(
        "Screen recording permission denied. Enable in System Settings > Privacy & Security > Screen Recording"
    )]
    PermissionDenied,

    #[error("Failed to enumerate {what}: {message}")]
    EnumerationFailed { what: &'static str, message: String },

    #[error("Failed to capture image: {0}")]
    CaptureFailed(String),

    #[error("Screen capture is not supported on this platform")]
    Unsupported,

    #[error("Failed to load image '{path}': {message}")]
    ImageLoadFailed { path: String, message: String },

    #[error("Failed to encode image '{path}': {message}")]
    EncodingFailed { path: String, message: String },

    /// Directory creation failed while saving a capture.
    #[error("Failed to create output directory '{path}': {source}")]
    DirectoryCreationFailed {
        path: String,
        source: std::io::Error,
    },
}

impl ClickshotError for CaptureError {
    fn error_code(&self) -> &'static str {
        match self {
            CaptureError::WindowNotFound { .. } => "CAPTURE_WINDOW_NOT_FOUND",
            CaptureError::WindowNotFoundByApp { .. } => "CAPTURE_WINDOW_NOT_FOUND_BY_APP",
            CaptureError::WindowNotFoundByAppAndTitle { .. } => {
                "CAPTURE_WINDOW_NOT_FOUND_BY_APP_AND_TITLE"
            }
            CaptureError::WindowMinimized { .. } => "CAPTURE_WINDOW_MINIMIZED",
            CaptureError::MonitorNotFound { .. } => "CAPTURE_MONITOR_NOT_FOUND",
            CaptureError::PermissionDenied => "CAPTURE_PERMISSION_DENIED",
            CaptureError::EnumerationFailed { .. } => "CAPTURE_ENUMERATION_FAILED",
            CaptureError::CaptureFailed(_) => "CAPTURE_FAILED",
            CaptureError::Unsupported => "CAPTURE_UNSUPPORTED",
            CaptureError::ImageLoadFailed { .. } => "CAPTURE_IMAGE_LOAD_FAILED",
            CaptureError::EncodingFailed { .. } => "CAPTURE_ENCODING_FAILED",
            CaptureError::DirectoryCreationFailed { .. } => "CAPTURE_DIRECTORY_CREATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            CaptureError::WindowNotFound { .. }
                | CaptureError::WindowNotFoundByApp { .. }
                | CaptureError::WindowNotFoundByAppAndTitle { .. }
                | CaptureError::WindowMinimized { .. }
                | CaptureError::MonitorNotFound { .. }
                | CaptureError::PermissionDenied
                | CaptureError::Unsupported
                | CaptureError::ImageLoadFailed { .. }
                | CaptureError::DirectoryCreationFailed { .. }
        )
    }
}
