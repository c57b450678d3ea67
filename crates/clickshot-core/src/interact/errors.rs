use crate::errors::ClickshotError;
use crate::matching::MatchError;

#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error(
        "Element '{element}' not found within {timeout_ms}ms (best confidence {confidence:.3})"
    )]
    ElementNotFound {
        element: String,
        timeout_ms: u64,
        confidence: f64,
    },

    #[error(
        "Accessibility permission denied. Enable in System Settings > Privacy & Security > Accessibility"
    )]
    AccessibilityPermissionDenied,

    #[error("Failed to create event source")]
    EventSourceFailed,

    #[error("Failed to create mouse event at ({x:.1}, {y:.1})")]
    MouseEventFailed { x: f64, y: f64 },

    #[error("Synthetic input is not supported on this platform")]
    Unsupported,

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl ClickshotError for InteractionError {
    fn error_code(&self) -> &'static str {
        match self {
            InteractionError::ElementNotFound { .. } => "INTERACTION_ELEMENT_NOT_FOUND",
            InteractionError::AccessibilityPermissionDenied => {
                "INTERACTION_ACCESSIBILITY_PERMISSION_DENIED"
            }
            InteractionError::EventSourceFailed => "INTERACTION_EVENT_SOURCE_FAILED",
            InteractionError::MouseEventFailed { .. } => "INTERACTION_MOUSE_EVENT_FAILED",
            InteractionError::Unsupported => "INTERACTION_UNSUPPORTED",
            InteractionError::Match(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            InteractionError::ElementNotFound { .. }
            | InteractionError::AccessibilityPermissionDenied
            | InteractionError::Unsupported => true,
            InteractionError::Match(e) => e.is_user_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureError;

    #[test]
    fn test_element_not_found_display() {
        let error = InteractionError::ElementNotFound {
            element: "browser.update_scanner_button".to_string(),
            timeout_ms: 2000,
            confidence: 0.41234,
        };
        assert_eq!(
            error.to_string(),
            "Element 'browser.update_scanner_button' not found within 2000ms (best confidence 0.412)"
        );
        assert_eq!(error.error_code(), "INTERACTION_ELEMENT_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_match_error_passes_through() {
        let error: InteractionError = MatchError::from(CaptureError::CaptureFailed(
            "boom".to_string(),
        ))
        .into();
        assert_eq!(error.error_code(), "CAPTURE_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InteractionError>();
    }
}
