use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::capture::{Capture, ScreenSource, save_capture};
use crate::interact::{
    ClickModifier, InputDriver, InteractionError, InteractionResult, click_point,
};
use crate::matching::{MatchConfig, MatchError, MatchResult, match_element};
use crate::reference::ReferenceLibrary;
use crate::region::{Element, Region, RegionError};
use crate::wait::{Attempt, PollOutcome, WaitConfig, poll_until};

use super::builder::SessionBuilder;
use super::handle::ElementHandle;

/// One capture together with the match found in it
#[derive(Debug, Clone)]
pub struct Located {
    pub capture: Capture,
    pub result: MatchResult,
}

/// Everything needed to check and click elements: the screen, the input
/// driver, reference images and matching/wait settings.
///
/// Sessions are synchronous; every call blocks until it resolves.
pub struct Session {
    screen: Box<dyn ScreenSource>,
    input: Box<dyn InputDriver>,
    references: ReferenceLibrary,
    failure_dir: Option<PathBuf>,
    match_config: MatchConfig,
    wait: WaitConfig,
    click_wait: WaitConfig,
}

impl Session {
    pub(super) fn new(
        screen: Box<dyn ScreenSource>,
        input: Box<dyn InputDriver>,
        references: ReferenceLibrary,
        failure_dir: Option<PathBuf>,
        match_config: MatchConfig,
        wait: WaitConfig,
        click_wait: WaitConfig,
    ) -> Self {
        Self {
            screen,
            input,
            references,
            failure_dir,
            match_config,
            wait,
            click_wait,
        }
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn references(&self) -> &ReferenceLibrary {
        &self.references
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.match_config
    }

    /// Default wait used by `eventually_visible`
    pub fn wait_config(&self) -> &WaitConfig {
        &self.wait
    }

    pub fn click_wait_config(&self) -> &WaitConfig {
        &self.click_wait
    }

    pub fn failure_dir(&self) -> Option<&Path> {
        self.failure_dir.as_deref()
    }

    /// Bind an element of `region` to this session
    pub fn element<'a>(
        &'a self,
        region: &'a Region,
        name: &str,
    ) -> Result<ElementHandle<'a>, RegionError> {
        let element = region.element(name)?;
        Ok(ElementHandle::new(self, region, element))
    }

    /// Capture the region once and match the element in it
    pub fn locate(&self, region: &Region, element: &Element) -> Result<Located, MatchError> {
        let reference = self.references.get(element)?;
        let capture = self.screen.capture(region.target())?;
        let result = match_element(&capture, element, &reference, &self.match_config)?;
        Ok(Located { capture, result })
    }

    /// Capture and match until the element is found or `wait` times out
    pub fn wait_for(
        &self,
        region: &Region,
        element: &Element,
        wait: &WaitConfig,
    ) -> Result<PollOutcome<Located>, MatchError> {
        info!(
            event = "core.session.wait_started",
            element = %element.path(),
            timeout_ms = wait.timeout().as_millis() as u64,
            poll_interval_ms = wait.poll_interval().as_millis() as u64
        );

        let outcome = poll_until(wait, || {
            let located = self.locate(region, element)?;
            Ok::<_, MatchError>(if located.result.found {
                Attempt::Done(located)
            } else {
                Attempt::Retry(located)
            })
        })?;

        if outcome.is_matched() {
            info!(
                event = "core.session.wait_completed",
                element = %element.path(),
                attempts = outcome.attempts(),
                elapsed_ms = outcome.elapsed().as_millis() as u64
            );
        } else {
            warn!(
                event = "core.session.wait_timeout",
                element = %element.path(),
                attempts = outcome.attempts(),
                elapsed_ms = outcome.elapsed().as_millis() as u64
            );
        }
        Ok(outcome)
    }

    /// Wait briefly for the element, then click the center of where it was found.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::ElementNotFound`] if the element does not
    /// appear within the click wait, a wrapped [`MatchError`] for capture or
    /// reference failures, or the input driver's error.
    pub fn click(
        &self,
        region: &Region,
        element: &Element,
        modifier: ClickModifier,
    ) -> Result<InteractionResult, InteractionError> {
        info!(
            event = "core.interact.click_started",
            element = %element.path(),
            modifier = ?modifier
        );

        let outcome = self.wait_for(region, element, &self.click_wait)?;
        let matched = outcome.is_matched();
        let attempts = outcome.attempts();
        let Some(located) = outcome.into_last() else {
            return Err(InteractionError::ElementNotFound {
                element: element.path(),
                timeout_ms: self.click_wait.timeout().as_millis() as u64,
                confidence: 0.0,
            });
        };

        let rect = match located.result.matched_rect() {
            Some(rect) if matched => rect,
            _ => {
                self.record_failure(element, &located.capture);
                return Err(InteractionError::ElementNotFound {
                    element: element.path(),
                    timeout_ms: self.click_wait.timeout().as_millis() as u64,
                    confidence: located.result.confidence,
                });
            }
        };

        let (screen_x, screen_y) = click_point(&located.capture, &rect);
        self.input.click(screen_x, screen_y, modifier)?;

        let action = modifier.action_name();
        info!(
            event = "core.interact.click_completed",
            action = action,
            element = %element.path(),
            screen_x = screen_x,
            screen_y = screen_y
        );

        Ok(InteractionResult::success(
            action,
            serde_json::json!({
                "element": element.path(),
                "rect": rect,
                "confidence": located.result.confidence,
                "attempts": attempts,
                "screen_x": screen_x,
                "screen_y": screen_y,
            }),
        ))
    }

    /// Save the area searched for `element` so a failed check can be inspected.
    ///
    /// Returns the written path, or `None` without a failure directory. A failed
    /// save is logged and also yields `None`.
    pub fn record_failure(&self, element: &Element, capture: &Capture) -> Option<PathBuf> {
        let dir = self.failure_dir.as_ref()?;
        let area = element
            .expected_rect()
            .expand(self.match_config.search_margin_px);
        let image = capture.crop(&area)?;
        let path = dir.join(format!("{}-{}.png", element.region(), element.name()));

        match save_capture(&Capture::from_image(image), &path) {
            Ok(()) => {
                info!(event = "core.session.failure_saved", path = %path.display());
                Some(path)
            }
            Err(e) => {
                warn!(
                    event = "core.session.failure_save_failed",
                    path = %path.display(),
                    error = %e
                );
                None
            }
        }
    }
}
