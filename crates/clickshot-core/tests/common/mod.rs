//! Fake screen and input backends shared by the integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use clickshot_core::capture::{Capture, CaptureError, CaptureTarget, ScreenSource};
use clickshot_core::interact::{ClickModifier, InputDriver, InteractionError};
use clickshot_core::{ElementConfig, Rect, Region};
use image::{GrayImage, Luma, Rgba, RgbaImage};

pub const BACKGROUND: u8 = 30;

/// A grayscale image with enough texture for a sharp correlation peak.
/// Different seeds give visibly different images.
pub fn textured(width: u32, height: u32, seed: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let v = (x * 37 + y * 91 + (x * y + seed) % 13 + seed * 71) % 256;
        Luma([v as u8])
    })
}

/// A flat screen of `width` x `height`
pub fn blank_screen(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([BACKGROUND, BACKGROUND, BACKGROUND, 255]))
}

/// Paint a grayscale image onto a screen at `rect`'s origin
pub fn paint(screen: &mut RgbaImage, image: &GrayImage, rect: Rect) {
    for (x, y, pixel) in image.enumerate_pixels() {
        let v = pixel[0];
        screen.put_pixel(rect.x() + x, rect.y() + y, Rgba([v, v, v, 255]));
    }
}

/// Write a reference image to `<dir>/<region>/<element>.png`
pub fn write_reference(dir: &Path, region: &str, element: &str, image: &GrayImage) {
    let region_dir = dir.join(region);
    std::fs::create_dir_all(&region_dir).unwrap();
    image.save(region_dir.join(format!("{element}.png"))).unwrap();
}

pub fn region(name: &str, target: CaptureTarget, elements: &[(&str, Rect)]) -> Region {
    Region::new(name, target)
        .configure(
            elements
                .iter()
                .map(|(element, rect)| ElementConfig::new(*element, *rect))
                .collect(),
        )
        .unwrap()
}

/// A screen whose contents the test can swap while a session holds it
#[derive(Clone)]
pub struct SharedScreen {
    current: Arc<Mutex<Capture>>,
    captures: Arc<AtomicUsize>,
}

impl SharedScreen {
    pub fn new(image: RgbaImage) -> Self {
        Self::with_capture(Capture::from_image(image))
    }

    pub fn with_capture(capture: Capture) -> Self {
        Self {
            current: Arc::new(Mutex::new(capture)),
            captures: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn show(&self, image: RgbaImage) {
        *self.current.lock().unwrap() = Capture::from_image(image);
    }

    pub fn capture_count(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

impl ScreenSource for SharedScreen {
    fn capture(&self, _target: &CaptureTarget) -> Result<Capture, CaptureError> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(self.current.lock().unwrap().clone())
    }
}

/// A screen that shows each frame once, then keeps showing the last one
pub struct FrameSequence {
    frames: Vec<Capture>,
    next: AtomicUsize,
}

impl FrameSequence {
    pub fn new(frames: Vec<RgbaImage>) -> Self {
        Self {
            frames: frames.into_iter().map(Capture::from_image).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl ScreenSource for FrameSequence {
    fn capture(&self, _target: &CaptureTarget) -> Result<Capture, CaptureError> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(self.frames[index.min(self.frames.len() - 1)].clone())
    }
}

/// Records every click and runs an optional reaction, like an app opening a popup
#[derive(Clone, Default)]
pub struct RecordingInput {
    clicks: Arc<Mutex<Vec<(f64, f64, ClickModifier)>>>,
    on_click: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl RecordingInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(mut self, reaction: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(reaction));
        self
    }

    pub fn clicks(&self) -> Vec<(f64, f64, ClickModifier)> {
        self.clicks.lock().unwrap().clone()
    }
}

impl InputDriver for RecordingInput {
    fn click(&self, x: f64, y: f64, modifier: ClickModifier) -> Result<(), InteractionError> {
        self.clicks.lock().unwrap().push((x, y, modifier));
        if let Some(reaction) = &self.on_click {
            reaction();
        }
        Ok(())
    }
}
