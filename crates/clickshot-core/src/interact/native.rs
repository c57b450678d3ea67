use std::thread;
use std::time::Duration;

use core_graphics::event::{CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, EventField};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use tracing::debug;

use super::driver::InputDriver;
use super::errors::InteractionError;
use super::types::ClickModifier;

// SAFETY: FFI declaration for AXIsProcessTrusted from macOS ApplicationServices framework.
// Returns false when the process lacks accessibility permissions (does not crash).
#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Delay between mouse down and mouse up events
const MOUSE_EVENT_DELAY: Duration = Duration::from_millis(10);

/// Posts CoreGraphics mouse events at the HID level
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphicsInput;

impl CoreGraphicsInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputDriver for CoreGraphicsInput {
    fn click(&self, x: f64, y: f64, modifier: ClickModifier) -> Result<(), InteractionError> {
        let trusted = unsafe { AXIsProcessTrusted() };
        if !trusted {
            return Err(InteractionError::AccessibilityPermissionDenied);
        }

        let point = CGPoint::new(x, y);
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|()| InteractionError::EventSourceFailed)?;

        let (down_type, up_type, button) = if modifier == ClickModifier::Right {
            (
                CGEventType::RightMouseDown,
                CGEventType::RightMouseUp,
                CGMouseButton::Right,
            )
        } else {
            (
                CGEventType::LeftMouseDown,
                CGEventType::LeftMouseUp,
                CGMouseButton::Left,
            )
        };

        let mouse_down = CGEvent::new_mouse_event(source.clone(), down_type, point, button)
            .map_err(|()| InteractionError::MouseEventFailed { x, y })?;
        let mouse_up = CGEvent::new_mouse_event(source, up_type, point, button)
            .map_err(|()| InteractionError::MouseEventFailed { x, y })?;

        if modifier == ClickModifier::Double {
            mouse_down.set_integer_value_field(EventField::MOUSE_EVENT_CLICK_STATE, 2);
            mouse_up.set_integer_value_field(EventField::MOUSE_EVENT_CLICK_STATE, 2);
        }

        debug!(
            event = "core.interact.click_posting",
            screen_x = x,
            screen_y = y,
            modifier = ?modifier
        );
        mouse_down.post(CGEventTapLocation::HID);
        thread::sleep(MOUSE_EVENT_DELAY);
        mouse_up.post(CGEventTapLocation::HID);

        Ok(())
    }
}
