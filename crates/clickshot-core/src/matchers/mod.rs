//! Visibility matchers in the `assert_that(actual, matcher)` style.
//!
//! ```no_run
//! use clickshot_core::matchers::{assert_that, eventually_visible, is, visible};
//! # fn demo(session: &clickshot_core::Session, popup: &clickshot_core::Region,
//! #         browser: &clickshot_core::Region) -> Result<(), Box<dyn std::error::Error>> {
//! let button = session.element(browser, "update_scanner_button")?;
//! assert_that(&button, is(visible()));
//!
//! button.click()?;
//! assert_that(&session.element(popup, "empty_popup")?, is(eventually_visible()));
//! # Ok(())
//! # }
//! ```

mod handler;
mod types;

pub use handler::{
    EventuallyVisible, Is, Matcher, Visible, assert_that, eventually_visible,
    eventually_visible_within, is, visible,
};
pub use types::AssertionResult;
