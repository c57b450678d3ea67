use std::time::Duration;

use tracing::{info, warn};

use super::types::AssertionResult;
use crate::matching::{MatchError, structural_similarity};
use crate::session::{ElementHandle, Located};
use crate::wait::WaitConfig;

/// A condition checked against an element on screen
pub trait Matcher {
    /// Description used in failure messages, e.g. "visible"
    fn describe(&self) -> String;

    /// Evaluate the condition.
    ///
    /// A condition that does not hold is a failed [`AssertionResult`]; `Err` is
    /// reserved for capture and configuration problems.
    fn check(&self, actual: &ElementHandle<'_>) -> Result<AssertionResult, MatchError>;
}

/// Single-shot visibility: one capture, one match, no retry
#[derive(Debug, Clone, Copy, Default)]
pub struct Visible;

pub fn visible() -> Visible {
    Visible
}

impl Matcher for Visible {
    fn describe(&self) -> String {
        "visible".to_string()
    }

    fn check(&self, actual: &ElementHandle<'_>) -> Result<AssertionResult, MatchError> {
        let located = actual.locate()?;
        let details = match_details(actual, &located);

        let result = if located.result.found {
            AssertionResult::pass(format!(
                "'{}' is visible (confidence {:.3})",
                actual.element().path(),
                located.result.confidence
            ))
        } else {
            actual
                .session()
                .record_failure(actual.element(), &located.capture);
            AssertionResult::fail(format!(
                "'{}' is not visible (best confidence {:.3}, threshold {:.3})",
                actual.element().path(),
                located.result.confidence,
                actual.session().match_config().threshold
            ))
        };
        Ok(result.with_details(details))
    }
}

/// Polling visibility: capture and match until found or the wait times out
#[derive(Debug, Clone, Copy, Default)]
pub struct EventuallyVisible {
    wait: Option<WaitConfig>,
}

/// Wait for visibility using the session's default timeout and poll interval
pub fn eventually_visible() -> EventuallyVisible {
    EventuallyVisible { wait: None }
}

pub fn eventually_visible_within(timeout: Duration, poll_interval: Duration) -> EventuallyVisible {
    EventuallyVisible {
        wait: Some(WaitConfig::new(timeout, poll_interval)),
    }
}

impl Matcher for EventuallyVisible {
    fn describe(&self) -> String {
        match &self.wait {
            Some(wait) => format!("eventually visible within {}ms", wait.timeout().as_millis()),
            None => "eventually visible".to_string(),
        }
    }

    fn check(&self, actual: &ElementHandle<'_>) -> Result<AssertionResult, MatchError> {
        let wait = self
            .wait
            .unwrap_or_else(|| *actual.session().wait_config());
        let outcome = actual.wait_visible_within(&wait)?;

        let matched = outcome.is_matched();
        let attempts = outcome.attempts();
        let elapsed_ms = outcome.elapsed().as_millis() as u64;
        let timeout_ms = wait.timeout().as_millis() as u64;

        let Some(located) = outcome.last() else {
            return Ok(AssertionResult::fail(format!(
                "'{}' was never checked",
                actual.element().path()
            )));
        };

        let mut details = match_details(actual, located);
        if let Some(map) = details.as_object_mut() {
            map.insert("attempts".to_string(), attempts.into());
            map.insert("elapsed_ms".to_string(), elapsed_ms.into());
            map.insert("timeout_ms".to_string(), timeout_ms.into());
        }

        let result = if matched {
            AssertionResult::pass(format!(
                "'{}' became visible after {}ms ({} attempts)",
                actual.element().path(),
                elapsed_ms,
                attempts
            ))
        } else {
            actual
                .session()
                .record_failure(actual.element(), &located.capture);
            AssertionResult::fail(format!(
                "'{}' did not become visible within {}ms ({} attempts, best confidence {:.3})",
                actual.element().path(),
                timeout_ms,
                attempts,
                located.result.confidence
            ))
        };
        Ok(result.with_details(details))
    }
}

/// Readability wrapper: `is(visible())` behaves exactly like `visible()`
#[derive(Debug, Clone, Copy)]
pub struct Is<M>(M);

pub fn is<M: Matcher>(matcher: M) -> Is<M> {
    Is(matcher)
}

impl<M: Matcher> Matcher for Is<M> {
    fn describe(&self) -> String {
        format!("is {}", self.0.describe())
    }

    fn check(&self, actual: &ElementHandle<'_>) -> Result<AssertionResult, MatchError> {
        self.0.check(actual)
    }
}

/// Assert that `matcher` holds for `actual`, panicking like `assert!` if not.
///
/// Capture and configuration errors also panic, with the error message, so a
/// broken setup fails the test instead of passing silently.
#[track_caller]
pub fn assert_that<M: Matcher>(actual: &ElementHandle<'_>, matcher: M) {
    let description = matcher.describe();
    info!(
        event = "core.assert.run_started",
        element = %actual.element().path(),
        matcher = %description
    );

    match matcher.check(actual) {
        Ok(result) if result.passed => {
            info!(event = "core.assert.run_passed", message = %result.message);
        }
        Ok(result) => {
            warn!(event = "core.assert.run_failed", message = %result.message);
            panic!(
                "Expected '{}' {}\n     but: {}",
                actual.element().path(),
                description,
                result.message
            );
        }
        Err(e) => {
            warn!(event = "core.assert.run_errored", error = %e);
            panic!(
                "Could not check '{}' {}: {}",
                actual.element().path(),
                description,
                e
            );
        }
    }
}

fn match_details(actual: &ElementHandle<'_>, located: &Located) -> serde_json::Value {
    let element = actual.element();
    let similarity = located.result.matched_rect().and_then(|rect| {
        actual
            .session()
            .references()
            .get(element)
            .ok()
            .and_then(|reference| structural_similarity(&located.capture, &rect, &reference))
    });

    serde_json::json!({
        "element": element.path(),
        "expected_rect": element.expected_rect(),
        "found": located.result.found,
        "rect": located.result.rect,
        "confidence": located.result.confidence,
        "threshold": actual.session().match_config().threshold,
        "structural_similarity": similarity,
    })
}
