use std::error::Error;

/// Base trait for all clickshot errors
pub trait ClickshotError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error was caused by the caller (bad configuration, missing window)
    /// rather than a failure inside clickshot
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the library
pub type ClickshotResult<T> = Result<T, Box<dyn ClickshotError>>;
