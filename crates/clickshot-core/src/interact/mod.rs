mod driver;
mod errors;
#[cfg(target_os = "macos")]
mod native;
mod types;

pub use driver::{InputDriver, UnsupportedInput, click_point, native_input};
pub use errors::InteractionError;
#[cfg(target_os = "macos")]
pub use native::CoreGraphicsInput;
pub use types::{ClickModifier, InteractionResult};
