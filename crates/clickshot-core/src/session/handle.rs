use crate::interact::{ClickModifier, InteractionError, InteractionResult};
use crate::matching::{MatchError, MatchResult};
use crate::region::{Element, Region};
use crate::wait::{PollOutcome, WaitConfig};

use super::handler::{Located, Session};

/// An element bound to the session that checks and clicks it
#[derive(Clone, Copy)]
pub struct ElementHandle<'a> {
    session: &'a Session,
    region: &'a Region,
    element: &'a Element,
}

impl<'a> ElementHandle<'a> {
    pub(super) fn new(session: &'a Session, region: &'a Region, element: &'a Element) -> Self {
        Self {
            session,
            region,
            element,
        }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub fn region(&self) -> &'a Region {
        self.region
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    /// Capture once and match, without retrying
    pub fn match_once(&self) -> Result<MatchResult, MatchError> {
        Ok(self.locate()?.result)
    }

    /// Capture once and match, keeping the capture
    pub fn locate(&self) -> Result<Located, MatchError> {
        self.session.locate(self.region, self.element)
    }

    /// Poll until visible or the session's default wait times out
    pub fn wait_visible(&self) -> Result<PollOutcome<Located>, MatchError> {
        self.wait_visible_within(self.session.wait_config())
    }

    pub fn wait_visible_within(&self, wait: &WaitConfig) -> Result<PollOutcome<Located>, MatchError> {
        self.session.wait_for(self.region, self.element, wait)
    }

    /// Left-click the element's center once it is visible
    pub fn click(&self) -> Result<InteractionResult, InteractionError> {
        self.click_with(ClickModifier::None)
    }

    pub fn click_with(&self, modifier: ClickModifier) -> Result<InteractionResult, InteractionError> {
        self.session.click(self.region, self.element, modifier)
    }
}

impl std::fmt::Debug for ElementHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("element", &self.element.path())
            .field("expected_rect", &self.element.expected_rect())
            .finish()
    }
}
