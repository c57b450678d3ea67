use std::collections::BTreeMap;

use super::errors::RegionError;
use super::handler::Region;
use super::types::Element;

/// All regions known to a test run, addressed by name
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: BTreeMap<String, Region>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from regions, rejecting duplicate names
    pub fn from_regions(regions: impl IntoIterator<Item = Region>) -> Result<Self, RegionError> {
        let mut set = Self::new();
        for region in regions {
            set.insert(region)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, region: Region) -> Result<(), RegionError> {
        if self.regions.contains_key(region.name()) {
            return Err(RegionError::DuplicateRegion {
                region: region.name().to_string(),
            });
        }
        self.regions.insert(region.name().to_string(), region);
        Ok(())
    }

    pub fn region(&self, name: &str) -> Result<&Region, RegionError> {
        self.regions
            .get(name)
            .ok_or_else(|| RegionError::UnknownRegion {
                region: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// Resolve a `<region>.<element>` path
    pub fn resolve(&self, path: &str) -> Result<(&Region, &Element), RegionError> {
        let (region_name, element_name) = path
            .split_once('.')
            .filter(|(r, e)| !r.is_empty() && !e.is_empty())
            .ok_or_else(|| RegionError::InvalidPath {
                path: path.to_string(),
            })?;

        let region = self.region(region_name)?;
        let element = region.element(element_name)?;
        Ok((region, element))
    }

    /// Regions in name order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureTarget;
    use crate::region::ElementConfig;

    fn regions() -> RegionSet {
        let popup = Region::new("popup", CaptureTarget::app("Firefox"))
            .configure(vec![ElementConfig::new("empty_popup", (10, 10, 40, 20))])
            .unwrap();
        let browser = Region::new("browser", CaptureTarget::app("Firefox"))
            .configure(vec![ElementConfig::new(
                "update_scanner_button",
                (300, 4, 24, 24),
            )])
            .unwrap();
        RegionSet::from_regions([popup, browser]).unwrap()
    }

    #[test]
    fn test_resolve_path() {
        let set = regions();
        let (region, element) = set.resolve("popup.empty_popup").unwrap();
        assert_eq!(region.name(), "popup");
        assert_eq!(element.name(), "empty_popup");
    }

    #[test]
    fn test_resolve_unknown_region_lists_names() {
        let err = regions().resolve("sidebar.title").unwrap_err();
        match err {
            RegionError::UnknownRegion { available, .. } => {
                assert_eq!(available, "browser, popup");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_malformed_paths() {
        let set = regions();
        for path in ["popup", ".empty_popup", "popup.", ""] {
            assert!(
                matches!(set.resolve(path), Err(RegionError::InvalidPath { .. })),
                "path {path:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_duplicate_region_rejected() {
        let mut set = regions();
        let err = set
            .insert(Region::new("popup", CaptureTarget::PrimaryMonitor))
            .unwrap_err();
        assert!(matches!(err, RegionError::DuplicateRegion { .. }));
        assert_eq!(set.len(), 2);
    }
}
