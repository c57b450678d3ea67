//! Application-level lifecycle events shared by the CLI and test harnesses.

use tracing::{error, info, warn};

use crate::errors::ClickshotError;

/// Log application startup
pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

/// Log an application error, at warn level for user errors and error level otherwise
pub fn log_app_error<E: ClickshotError>(error: &E) {
    if error.is_user_error() {
        warn!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    } else {
        error!(
            event = "core.app.error_occurred",
            error_code = error.error_code(),
            error = %error
        );
    }
}
