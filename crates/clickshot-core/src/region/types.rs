use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Configuration for one matchable element within a region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementConfig {
    /// Element name, unique within its region. Also the reference image file stem.
    pub name: String,
    /// Where the element's reference image is expected, relative to the region origin
    pub expected_rect: Rect,
}

impl ElementConfig {
    pub fn new(name: impl Into<String>, expected_rect: impl Into<Rect>) -> Self {
        Self {
            name: name.into(),
            expected_rect: expected_rect.into(),
        }
    }
}

/// A configured element. Immutable once its region is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    region: String,
    expected_rect: Rect,
}

impl Element {
    pub(crate) fn new(region: &str, config: ElementConfig) -> Self {
        Self {
            name: config.name,
            region: region.to_string(),
            expected_rect: config.expected_rect,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning region
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn expected_rect(&self) -> Rect {
        self.expected_rect
    }

    /// `<region>.<element>`, as used in logs and on the command line
    pub fn path(&self) -> String {
        format!("{}.{}", self.region, self.name)
    }

    /// Key of the reference image in the image library: `<region>/<element>`
    pub fn reference_key(&self) -> String {
        format!("{}/{}", self.region, self.name)
    }
}
