use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Where a region lives on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureTarget {
    /// Window by title (exact match preferred, falls back to partial)
    Window { title: String },
    /// First window of an application
    App { app: String },
    /// Window of an application with a given title
    AppAndWindow { app: String, title: String },
    /// Monitor by enumeration index
    Monitor { index: usize },
    /// The primary monitor
    PrimaryMonitor,
}

impl CaptureTarget {
    pub fn window(title: impl Into<String>) -> Self {
        CaptureTarget::Window {
            title: title.into(),
        }
    }

    pub fn app(app: impl Into<String>) -> Self {
        CaptureTarget::App { app: app.into() }
    }

    pub fn app_and_window(app: impl Into<String>, title: impl Into<String>) -> Self {
        CaptureTarget::AppAndWindow {
            app: app.into(),
            title: title.into(),
        }
    }

    pub fn monitor(index: usize) -> Self {
        CaptureTarget::Monitor { index }
    }
}

impl std::fmt::Display for CaptureTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureTarget::Window { title } => write!(f, "window '{}'", title),
            CaptureTarget::App { app } => write!(f, "app '{}'", app),
            CaptureTarget::AppAndWindow { app, title } => {
                write!(f, "window '{}' of app '{}'", title, app)
            }
            CaptureTarget::Monitor { index } => write!(f, "monitor {}", index),
            CaptureTarget::PrimaryMonitor => write!(f, "primary monitor"),
        }
    }
}

/// A captured bitmap of a region's screen area
#[derive(Debug, Clone)]
pub struct Capture {
    image: RgbaImage,
    origin_x: i32,
    origin_y: i32,
    scale_factor: f32,
}

impl Capture {
    /// Wrap a bitmap whose top-left pixel sits at `(origin_x, origin_y)` in
    /// screen points. `scale_factor` is physical pixels per point.
    pub fn new(image: RgbaImage, origin_x: i32, origin_y: i32, scale_factor: f32) -> Self {
        let scale_factor = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        Self {
            image,
            origin_x,
            origin_y,
            scale_factor,
        }
    }

    /// A capture anchored at the screen origin with no scaling
    pub fn from_image(image: RgbaImage) -> Self {
        Self::new(image, 0, 0, 1.0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Grayscale copy of the part of the capture covered by `rect`.
    ///
    /// Returns the area actually converted (clamped to bounds) with the image.
    pub fn luma_area(&self, rect: &Rect) -> Option<(Rect, GrayImage)> {
        let area = rect.clamp_to(self.width(), self.height())?;
        let view =
            image::imageops::crop_imm(&self.image, area.x(), area.y(), area.width(), area.height());
        Some((area, image::DynamicImage::ImageRgba8(view.to_image()).to_luma8()))
    }

    /// Copy out the part of the capture covered by `rect`, clamped to bounds
    pub fn crop(&self, rect: &Rect) -> Option<RgbaImage> {
        let area = rect.clamp_to(self.width(), self.height())?;
        Some(
            image::imageops::crop_imm(&self.image, area.x(), area.y(), area.width(), area.height())
                .to_image(),
        )
    }

    /// Translate a capture pixel into screen points for input events
    pub fn to_screen_point(&self, x: u32, y: u32) -> (f64, f64) {
        let scale = f64::from(self.scale_factor);
        (
            f64::from(self.origin_x) + f64::from(x) / scale,
            f64::from(self.origin_y) + f64::from(y) / scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_target_display() {
        assert_eq!(
            CaptureTarget::window("Page Properties").to_string(),
            "window 'Page Properties'"
        );
        assert_eq!(
            CaptureTarget::app_and_window("Firefox", "Sidebar").to_string(),
            "window 'Sidebar' of app 'Firefox'"
        );
        assert_eq!(CaptureTarget::PrimaryMonitor.to_string(), "primary monitor");
    }

    #[test]
    fn test_to_screen_point_applies_origin_and_scale() {
        let capture = Capture::new(RgbaImage::new(200, 100), 40, 25, 2.0);
        assert_eq!(capture.to_screen_point(100, 50), (90.0, 50.0));
    }

    #[test]
    fn test_invalid_scale_falls_back_to_one() {
        let capture = Capture::new(RgbaImage::new(1, 1), 0, 0, 0.0);
        assert!((capture.scale_factor() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let capture = Capture::from_image(RgbaImage::new(50, 40));
        let cropped = capture.crop(&Rect::new(40, 30, 20, 20)).unwrap();
        assert_eq!(cropped.dimensions(), (10, 10));
        assert!(capture.crop(&Rect::new(60, 0, 5, 5)).is_none());
    }

    #[test]
    fn test_luma_area_converts_only_the_clamped_area() {
        let mut image = RgbaImage::from_pixel(50, 40, image::Rgba([0, 0, 0, 255]));
        image.put_pixel(45, 35, image::Rgba([255, 255, 255, 255]));
        let capture = Capture::from_image(image);

        let (area, gray) = capture.luma_area(&Rect::new(40, 30, 20, 20)).unwrap();
        assert_eq!(area, Rect::new(40, 30, 10, 10));
        assert_eq!(gray.dimensions(), (10, 10));
        assert_eq!(gray.get_pixel(5, 5)[0], 255);
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert!(capture.luma_area(&Rect::new(60, 0, 5, 5)).is_none());
    }
}
