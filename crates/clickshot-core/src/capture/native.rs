use tracing::{debug, info, warn};

use super::errors::CaptureError;
use super::handler::ScreenSource;
use super::types::{Capture, CaptureTarget};

/// Live screen capture through xcap
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapScreen;

impl XcapScreen {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenSource for XcapScreen {
    fn capture(&self, target: &CaptureTarget) -> Result<Capture, CaptureError> {
        info!(event = "core.capture.live_started", target = %target);

        let capture = match target {
            CaptureTarget::Window { title } => capture_window(find_window(None, Some(title))?),
            CaptureTarget::App { app } => capture_window(find_window(Some(app), None)?),
            CaptureTarget::AppAndWindow { app, title } => {
                capture_window(find_window(Some(app), Some(title))?)
            }
            CaptureTarget::Monitor { index } => {
                let monitor = enumerate_monitors()?
                    .into_iter()
                    .nth(*index)
                    .ok_or(CaptureError::MonitorNotFound { index: *index })?;
                capture_monitor(&monitor)
            }
            CaptureTarget::PrimaryMonitor => capture_monitor(&primary_monitor()?),
        }?;

        info!(
            event = "core.capture.live_completed",
            width = capture.width(),
            height = capture.height(),
            scale_factor = capture.scale_factor()
        );
        Ok(capture)
    }
}

/// Check if an error message indicates a permission error
fn is_permission_error(message: &str) -> bool {
    message.contains("permission") || message.contains("denied")
}

fn enumeration_error(what: &'static str, e: xcap::XCapError) -> CaptureError {
    let message = e.to_string();
    if is_permission_error(&message) {
        debug!(event = "core.capture.permission_error_detected", message = %message);
        CaptureError::PermissionDenied
    } else {
        CaptureError::EnumerationFailed { what, message }
    }
}

fn enumerate_windows() -> Result<Vec<xcap::Window>, CaptureError> {
    xcap::Window::all().map_err(|e| enumeration_error("windows", e))
}

fn enumerate_monitors() -> Result<Vec<xcap::Monitor>, CaptureError> {
    xcap::Monitor::all().map_err(|e| enumeration_error("monitors", e))
}

fn primary_monitor() -> Result<xcap::Monitor, CaptureError> {
    let mut monitors = enumerate_monitors()?;

    if let Some(index) = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
    {
        return Ok(monitors.swap_remove(index));
    }

    // Fall back to first monitor if no primary is set
    warn!(event = "core.capture.no_primary_monitor_using_fallback");
    if monitors.is_empty() {
        return Err(CaptureError::MonitorNotFound { index: 0 });
    }
    Ok(monitors.swap_remove(0))
}

/// Find a window by app and/or title.
///
/// Matching priority per field: exact case-insensitive match first, then
/// partial. When only a title is given, the app name is also searched so
/// `Firefox` finds the browser window whatever page it shows.
fn find_window(app: Option<&str>, title: Option<&str>) -> Result<xcap::Window, CaptureError> {
    debug!(event = "core.capture.find_window_started", app = ?app, title = ?title);

    let mut windows: Vec<_> = enumerate_windows()?
        .into_iter()
        .filter_map(|w| {
            let id = w.id().ok()?;
            let window_title = w.title().unwrap_or_else(|e| {
                debug!(
                    event = "core.capture.property_access_failed",
                    property = "title",
                    window_id = id,
                    error = %e
                );
                String::new()
            });
            let app_name = w.app_name().unwrap_or_default();
            Some((w, window_title.to_lowercase(), app_name.to_lowercase()))
        })
        .collect();

    let app_lower = app.map(str::to_lowercase);
    let title_lower = title.map(str::to_lowercase);

    let app_matches = |name: &str, exact: bool| match &app_lower {
        Some(wanted) if exact => name == wanted,
        Some(wanted) => name.contains(wanted.as_str()),
        None => true,
    };
    let title_matches = |window_title: &str, app_name: &str, exact: bool| match &title_lower {
        Some(wanted) if exact => {
            window_title == wanted || (app_lower.is_none() && app_name == wanted)
        }
        Some(wanted) => {
            window_title.contains(wanted.as_str())
                || (app_lower.is_none() && app_name.contains(wanted.as_str()))
        }
        None => true,
    };

    // (exact app, exact title), then progressively looser combinations
    let passes = [(true, true), (false, true), (true, false), (false, false)];
    for (exact_app, exact_title) in passes {
        if let Some(index) = windows.iter().position(|(_, window_title, app_name)| {
            app_matches(app_name, exact_app) && title_matches(window_title, app_name, exact_title)
        }) {
            let (window, _, _) = windows.swap_remove(index);
            return Ok(window);
        }
    }

    Err(match (app, title) {
        (Some(app), Some(title)) => CaptureError::WindowNotFoundByAppAndTitle {
            app: app.to_string(),
            title: title.to_string(),
        },
        (Some(app), None) => CaptureError::WindowNotFoundByApp {
            app: app.to_string(),
        },
        (None, title) => CaptureError::WindowNotFound {
            title: title.unwrap_or_default().to_string(),
        },
    })
}

fn capture_window(window: xcap::Window) -> Result<Capture, CaptureError> {
    let title = window.title().unwrap_or_default();

    let is_minimized = window.is_minimized().unwrap_or_else(|e| {
        debug!(
            event = "core.capture.is_minimized_check_failed",
            title = %title,
            error = %e
        );
        // Proceed anyway - capture will fail if there's a real problem
        false
    });
    if is_minimized {
        return Err(CaptureError::WindowMinimized { title });
    }

    let scale_factor = window
        .current_monitor()
        .and_then(|m| m.scale_factor())
        .unwrap_or_else(|e| {
            debug!(event = "core.capture.scale_factor_unavailable", error = %e);
            1.0
        });
    let x = window.x().unwrap_or(0);
    let y = window.y().unwrap_or(0);

    let image = window
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    Ok(Capture::new(image, x, y, scale_factor))
}

fn capture_monitor(monitor: &xcap::Monitor) -> Result<Capture, CaptureError> {
    let scale_factor = monitor.scale_factor().unwrap_or(1.0);
    let x = monitor.x().unwrap_or(0);
    let y = monitor.y().unwrap_or(0);

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    Ok(Capture::new(image, x, y, scale_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClickshotError;

    #[test]
    fn test_capture_nonexistent_window() {
        let result =
            XcapScreen::new().capture(&CaptureTarget::window("NONEXISTENT_WINDOW_12345_UNIQUE"));
        assert!(result.is_err());
    }

    #[test]
    fn test_capture_nonexistent_monitor() {
        let result = XcapScreen::new().capture(&CaptureTarget::monitor(999));
        if let Err(e) = result {
            assert!(matches!(
                e.error_code(),
                "CAPTURE_MONITOR_NOT_FOUND"
                    | "CAPTURE_PERMISSION_DENIED"
                    | "CAPTURE_ENUMERATION_FAILED"
            ));
        } else {
            panic!("monitor 999 should not exist");
        }
    }

    #[test]
    fn test_permission_error_detection() {
        assert!(is_permission_error("permission denied by user"));
        assert!(!is_permission_error("display not found"));
    }
}
