use crate::capture::CaptureError;
use crate::errors::ClickshotError;
use crate::reference::ReferenceError;
use crate::region::RegionError;

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Region(#[from] RegionError),

    #[error(
        "Reference image for '{element}' is {reference_width}x{reference_height} but expected_rect is {expected_width}x{expected_height}"
    )]
    ReferenceSizeMismatch {
        element: String,
        reference_width: u32,
        reference_height: u32,
        expected_width: u32,
        expected_height: u32,
    },
}

impl ClickshotError for MatchError {
    fn error_code(&self) -> &'static str {
        match self {
            MatchError::Capture(e) => e.error_code(),
            MatchError::Reference(e) => e.error_code(),
            MatchError::Region(e) => e.error_code(),
            MatchError::ReferenceSizeMismatch { .. } => "MATCH_REFERENCE_SIZE_MISMATCH",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            MatchError::Capture(e) => e.is_user_error(),
            MatchError::Reference(e) => e.is_user_error(),
            MatchError::Region(e) => e.is_user_error(),
            MatchError::ReferenceSizeMismatch { .. } => true,
        }
    }
}
