mod builder;
mod handle;
mod handler;

pub use builder::{DEFAULT_CLICK_TIMEOUT_MS, SessionBuilder};
pub use handle::ElementHandle;
pub use handler::{Located, Session};
