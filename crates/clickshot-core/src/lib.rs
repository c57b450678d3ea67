//! clickshot-core: Screen region matching for functional UI tests
//!
//! This library provides functionality for:
//! - Declaring regions of the screen and the elements expected in them
//! - Capturing regions and matching reference images against them
//! - Polling until an element appears, with a monotonic deadline
//! - Clicking matched elements through the platform's input system
//! - Loading all of the above from `clickshot.toml`

pub mod capture;
pub mod config;
pub mod errors;
pub mod events;
pub mod geometry;
pub mod interact;
pub mod logging;
pub mod matchers;
pub mod matching;
pub mod reference;
pub mod region;
pub mod session;
pub mod wait;

// Re-export commonly used types at the crate root
pub use errors::{ClickshotError, ClickshotResult};
pub use geometry::Rect;
pub use logging::init_logging;

// Re-export region types
pub use region::{Element, ElementConfig, Region, RegionError, RegionSet};

// Re-export capture types
pub use capture::{Capture, CaptureError, CaptureTarget, ScreenSource, StaticScreen};

// Re-export matching types
pub use matching::{MatchConfig, MatchError, MatchResult};

// Re-export wait and matcher types
pub use matchers::{AssertionResult, Matcher, assert_that, eventually_visible, is, visible};
pub use wait::{PollOutcome, PollState, WaitConfig};

// Re-export interaction and session types
pub use config::{ClickshotConfig, ConfigError};
pub use interact::{ClickModifier, InputDriver, InteractionError, InteractionResult};
pub use session::{ElementHandle, Session, SessionBuilder};
