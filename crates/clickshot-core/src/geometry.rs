use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixels, relative to a region's origin.
///
/// Coordinates are unsigned so a rectangle can never start left of or above
/// its region. Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Rect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point, rounded down to whole pixels for odd sizes
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Grow the rectangle by `margin` on every side. The top-left corner
    /// saturates at zero.
    pub fn expand(&self, margin: u32) -> Rect {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        Rect::new(
            x,
            y,
            self.right().saturating_add(margin) - x,
            self.bottom().saturating_add(margin) - y,
        )
    }

    /// Intersect with a `width` x `height` area anchored at the origin.
    /// Returns `None` when nothing of the rectangle is inside.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let right = self.right().min(width);
        let bottom = self.bottom().min(height);
        let clamped = Rect::new(self.x, self.y, right - self.x, bottom - self.y);
        (!clamped.is_empty()).then_some(clamped)
    }

    /// Whether both rectangles have the same size and their origins differ by
    /// at most `tolerance` pixels on each axis
    pub fn is_within(&self, other: &Rect, tolerance: u32) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.x.abs_diff(other.x) <= tolerance
            && self.y.abs_diff(other.y) <= tolerance
    }
}

impl From<[u32; 4]> for Rect {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Rect::new(x, y, width, height)
    }
}

impl From<Rect> for [u32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.x, rect.y, rect.width, rect.height]
    }
}

impl From<(u32, u32, u32, u32)> for Rect {
    fn from((x, y, width, height): (u32, u32, u32, u32)) -> Self {
        Rect::new(x, y, width, height)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
