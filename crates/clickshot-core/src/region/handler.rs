use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use super::errors::RegionError;
use super::types::{Element, ElementConfig};
use crate::capture::CaptureTarget;

/// A named screen area with a registry of expected elements
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    name: String,
    target: CaptureTarget,
    elements: BTreeMap<String, Element>,
}

impl Region {
    /// Create an empty region located on screen by `target`
    pub fn new(name: impl Into<String>, target: CaptureTarget) -> Self {
        Self {
            name: name.into(),
            target,
            elements: BTreeMap::new(),
        }
    }

    /// Register elements under this region.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DuplicateElement`] if a name appears twice (including
    /// names registered by an earlier `configure` call) and
    /// [`RegionError::EmptyRect`] for a zero-sized expected rectangle.
    pub fn configure(mut self, elements: Vec<ElementConfig>) -> Result<Self, RegionError> {
        for config in elements {
            if config.expected_rect.is_empty() {
                return Err(RegionError::EmptyRect {
                    region: self.name.clone(),
                    element: config.name,
                });
            }
            if self.elements.contains_key(&config.name) {
                return Err(RegionError::DuplicateElement {
                    region: self.name.clone(),
                    element: config.name,
                });
            }
            debug!(
                event = "core.region.element_registered",
                region = %self.name,
                element = %config.name,
                expected_rect = %config.expected_rect
            );
            let element = Element::new(&self.name, config);
            self.elements.insert(element.name().to_string(), element);
        }

        info!(
            event = "core.region.configure_completed",
            region = %self.name,
            element_count = self.elements.len()
        );
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &CaptureTarget {
        &self.target
    }

    /// Look up an element by name
    pub fn element(&self, name: &str) -> Result<&Element, RegionError> {
        self.elements
            .get(name)
            .ok_or_else(|| RegionError::UnknownElement {
                region: self.name.clone(),
                element: name.to_string(),
                available: self.element_names().join(", "),
            })
    }

    /// Elements in name order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn element_names(&self) -> Vec<&str> {
        self.elements.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
