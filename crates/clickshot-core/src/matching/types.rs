use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Default minimum normalized correlation for a match
pub const DEFAULT_THRESHOLD: f64 = 0.95;
/// Default allowed offset between the matched and expected rectangles, in pixels
pub const DEFAULT_TOLERANCE_PX: u32 = 2;
/// Default distance around the expected rectangle that is searched, in pixels
pub const DEFAULT_SEARCH_MARGIN_PX: u32 = 16;

/// Settings for the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum correlation score (0.0 - 1.0, default 0.95)
    pub threshold: f64,
    /// Maximum offset of the match from `expected_rect` on either axis (default 2)
    pub tolerance_px: u32,
    /// How far around `expected_rect` to search (default 16)
    pub search_margin_px: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            tolerance_px: DEFAULT_TOLERANCE_PX,
            search_margin_px: DEFAULT_SEARCH_MARGIN_PX,
        }
    }
}

impl MatchConfig {
    /// Set the threshold, clamped to 0.0 - 1.0
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_tolerance(mut self, tolerance_px: u32) -> Self {
        self.tolerance_px = tolerance_px;
        self
    }

    pub fn with_search_margin(mut self, search_margin_px: u32) -> Self {
        self.search_margin_px = search_margin_px;
        self
    }

    /// Whether a candidate counts as a match: the score reaches the threshold
    /// (inclusive) and the candidate sits where the element is expected
    pub fn accepts(&self, confidence: f64, candidate: &Rect, expected: &Rect) -> bool {
        confidence >= self.threshold && candidate.is_within(expected, self.tolerance_px)
    }
}

/// Outcome of one matching attempt.
///
/// `rect` holds the best-scoring candidate even when it was rejected, so
/// failures can report where the closest lookalike was.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rect: Option<Rect>,
    /// Correlation score of the best candidate, 0.0 - 1.0
    pub confidence: f64,
}

impl MatchResult {
    pub fn found(rect: Rect, confidence: f64) -> Self {
        Self {
            found: true,
            rect: Some(rect),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn rejected(rect: Rect, confidence: f64) -> Self {
        Self {
            found: false,
            rect: Some(rect),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// No candidate location at all, e.g. the capture is smaller than the element
    pub fn not_found() -> Self {
        Self {
            found: false,
            rect: None,
            confidence: 0.0,
        }
    }

    /// The matched rectangle, only when the match was accepted
    pub fn matched_rect(&self) -> Option<Rect> {
        if self.found { self.rect } else { None }
    }
}
