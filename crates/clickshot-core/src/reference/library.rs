use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::GrayImage;
use tracing::{debug, info};

use super::errors::ReferenceError;
use crate::region::Element;

/// File extensions searched for a reference image, in order
pub const REFERENCE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Reference images keyed by `<region>/<element>`.
///
/// Images are read from `<root>/<region>/<element>.<ext>` on first use and
/// cached in grayscale for the rest of the session.
#[derive(Debug, Default)]
pub struct ReferenceLibrary {
    root: PathBuf,
    cache: Mutex<HashMap<String, Arc<GrayImage>>>,
}

impl ReferenceLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register an in-memory reference, replacing any cached image for the element
    pub fn insert(&self, element: &Element, image: GrayImage) {
        let mut cache = self.cache.lock().unwrap_or_else(|p| p.into_inner());
        cache.insert(element.reference_key(), Arc::new(image));
    }

    /// Get the reference image for an element, loading it from disk if needed
    pub fn get(&self, element: &Element) -> Result<Arc<GrayImage>, ReferenceError> {
        let key = element.reference_key();

        if let Some(image) = self
            .cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(&key)
        {
            debug!(event = "core.reference.cache_hit", key = %key);
            return Ok(Arc::clone(image));
        }

        let path = self.locate(element).ok_or_else(|| ReferenceError::NotFound {
            key: key.clone(),
            dir: self.root.join(element.region()).display().to_string(),
        })?;

        info!(event = "core.reference.load_started", path = %path.display());
        let image = image::open(&path)
            .map_err(|e| ReferenceError::LoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
            .to_luma8();
        info!(
            event = "core.reference.load_completed",
            key = %key,
            width = image.width(),
            height = image.height()
        );

        let image = Arc::new(image);
        self.cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key, Arc::clone(&image));
        Ok(image)
    }

    fn locate(&self, element: &Element) -> Option<PathBuf> {
        let dir = self.root.join(element.region());
        REFERENCE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", element.name(), ext)))
            .find(|path| path.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureTarget;
    use crate::errors::ClickshotError;
    use crate::region::{ElementConfig, Region};
    use image::Luma;

    fn region() -> Region {
        Region::new("browser", CaptureTarget::app("Firefox"))
            .configure(vec![ElementConfig::new(
                "update_scanner_button",
                (10, 10, 4, 3),
            )])
            .unwrap()
    }

    #[test]
    fn test_loads_from_region_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("browser")).unwrap();
        let mut reference = GrayImage::new(4, 3);
        reference.put_pixel(2, 1, Luma([255]));
        reference
            .save(dir.path().join("browser/update_scanner_button.png"))
            .unwrap();

        let library = ReferenceLibrary::new(dir.path());
        let region = region();
        let element = region.element("update_scanner_button").unwrap();
        let loaded = library.get(element).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(2, 1), &Luma([255]));

        // Second lookup is served from the cache even if the file goes away
        std::fs::remove_file(dir.path().join("browser/update_scanner_button.png")).unwrap();
        assert!(library.get(element).is_ok());
    }

    #[test]
    fn test_missing_reference() {
        let dir = tempfile::tempdir().unwrap();
        let library = ReferenceLibrary::new(dir.path());
        let region = region();
        let err = library
            .get(region.element("update_scanner_button").unwrap())
            .unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_NOT_FOUND");
        assert!(err.to_string().contains("browser/update_scanner_button"));
    }

    #[test]
    fn test_insert_overrides_disk() {
        let library = ReferenceLibrary::new("/nonexistent");
        let region = region();
        let element = region.element("update_scanner_button").unwrap();
        library.insert(element, GrayImage::new(4, 3));
        assert_eq!(library.get(element).unwrap().dimensions(), (4, 3));
    }
}
