mod errors;
mod handler;
#[cfg(target_os = "macos")]
mod native;
mod types;

pub use errors::CaptureError;
pub use handler::{ScreenSource, StaticScreen, UnsupportedScreen, save_capture};
#[cfg(target_os = "macos")]
pub use native::XcapScreen;
pub use types::{Capture, CaptureTarget};

/// The platform's live screen source
pub fn native_screen() -> Box<dyn ScreenSource> {
    #[cfg(target_os = "macos")]
    {
        Box::new(XcapScreen::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(UnsupportedScreen)
    }
}
