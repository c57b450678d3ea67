use super::errors::InteractionError;
use super::types::ClickModifier;
use crate::capture::Capture;
use crate::geometry::Rect;

/// Sends synthetic input events at screen coordinates (in points)
pub trait InputDriver: Send + Sync {
    fn click(&self, x: f64, y: f64, modifier: ClickModifier) -> Result<(), InteractionError>;
}

/// Input driver for platforms without synthetic input support
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedInput;

impl InputDriver for UnsupportedInput {
    fn click(&self, _x: f64, _y: f64, _modifier: ClickModifier) -> Result<(), InteractionError> {
        Err(InteractionError::Unsupported)
    }
}

/// The platform's input driver
pub fn native_input() -> Box<dyn InputDriver> {
    #[cfg(target_os = "macos")]
    {
        Box::new(super::native::CoreGraphicsInput::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(UnsupportedInput)
    }
}

/// Screen point at the center of `rect`, a rectangle in `capture` pixels
pub fn click_point(capture: &Capture, rect: &Rect) -> (f64, f64) {
    let (cx, cy) = rect.center();
    capture.to_screen_point(cx, cy)
}
