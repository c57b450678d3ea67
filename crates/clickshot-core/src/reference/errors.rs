use crate::errors::ClickshotError;

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("No reference image for '{key}' in '{dir}' (tried .png, .jpg, .jpeg)")]
    NotFound { key: String, dir: String },

    #[error("Failed to load reference image '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

impl ClickshotError for ReferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            ReferenceError::NotFound { .. } => "REFERENCE_NOT_FOUND",
            ReferenceError::LoadFailed { .. } => "REFERENCE_LOAD_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}
