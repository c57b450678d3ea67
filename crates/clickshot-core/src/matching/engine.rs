use image::GrayImage;
use image_compare::Algorithm;
use tracing::{debug, info};

use super::errors::MatchError;
use super::types::{MatchConfig, MatchResult};
use crate::capture::Capture;
use crate::geometry::Rect;
use crate::region::Element;

/// Mean difference under which two flat patches count as the same color
const FLAT_MEAN_TOLERANCE: f64 = 1.0;

/// Locate an element's reference image in a capture.
///
/// Searches the element's expected rectangle grown by `search_margin_px` and
/// keeps the best zero-mean normalized cross-correlation score. The result is
/// a match only when that score reaches the threshold and the location is
/// within `tolerance_px` of the expected rectangle.
///
/// # Errors
///
/// Returns [`MatchError::ReferenceSizeMismatch`] if the reference image and
/// the expected rectangle differ in size. A missing match is not an error.
pub fn match_element(
    capture: &Capture,
    element: &Element,
    reference: &GrayImage,
    config: &MatchConfig,
) -> Result<MatchResult, MatchError> {
    let expected = element.expected_rect();

    if reference.dimensions() != (expected.width(), expected.height()) {
        return Err(MatchError::ReferenceSizeMismatch {
            element: element.path(),
            reference_width: reference.width(),
            reference_height: reference.height(),
            expected_width: expected.width(),
            expected_height: expected.height(),
        });
    }

    let search_area = expected.expand(config.search_margin_px);
    debug!(
        event = "core.match.search_started",
        element = %element.path(),
        search_area = %search_area,
        capture_width = capture.width(),
        capture_height = capture.height()
    );

    let best = capture.luma_area(&search_area).and_then(|(area, haystack)| {
        // The grayscale copy covers only `area`; search it in local coordinates
        let whole = Rect::new(0, 0, area.width(), area.height());
        let preferred = Rect::new(
            expected.x() - area.x(),
            expected.y() - area.y(),
            expected.width(),
            expected.height(),
        );
        match_template(&haystack, reference, &whole, &preferred).map(|(rect, score)| {
            let rect = Rect::new(rect.x() + area.x(), rect.y() + area.y(), rect.width(), rect.height());
            (rect, score)
        })
    });

    let result = match best {
        Some((candidate, score)) if config.accepts(score, &candidate, &expected) => {
            MatchResult::found(candidate, score)
        }
        Some((candidate, score)) => MatchResult::rejected(candidate, score),
        None => MatchResult::not_found(),
    };

    info!(
        event = "core.match.search_completed",
        element = %element.path(),
        found = result.found,
        confidence = result.confidence,
        rect = ?result.rect
    );
    Ok(result)
}

/// Find the best placement of `template` inside `search_area` of `haystack`.
///
/// Returns the candidate rectangle and its score, clamped to 0.0 - 1.0, or
/// `None` when the template does not fit in the (clamped) search area. Equal
/// scores resolve to the candidate nearest to `preferred`.
pub fn match_template(
    haystack: &GrayImage,
    template: &GrayImage,
    search_area: &Rect,
    preferred: &Rect,
) -> Option<(Rect, f64)> {
    let (tw, th) = template.dimensions();
    if tw == 0 || th == 0 {
        return None;
    }

    let area = search_area.clamp_to(haystack.width(), haystack.height())?;
    if area.width() < tw || area.height() < th {
        return None;
    }

    let stats = TemplateStats::new(template);
    let integrals = IntegralImages::new(haystack, &area);
    let mut best: Option<(Rect, f64, u64)> = None;

    for y in area.y()..=(area.bottom() - th) {
        for x in area.x()..=(area.right() - tw) {
            let score = stats.score_at(haystack, &integrals, x, y);
            let distance = u64::from(x.abs_diff(preferred.x())).pow(2)
                + u64::from(y.abs_diff(preferred.y())).pow(2);

            let better = match best {
                None => true,
                Some((_, best_score, best_distance)) => {
                    score > best_score || (score == best_score && distance < best_distance)
                }
            };
            if better {
                best = Some((Rect::new(x, y, tw, th), score, distance));
            }
        }
    }

    best.map(|(rect, score, _)| (rect, score))
}

/// Structural similarity (MSSIM) between a reference and the capture at `rect`.
///
/// Reported alongside match results for diagnostics. `None` if the area falls
/// outside the capture or the comparison cannot be computed.
pub fn structural_similarity(capture: &Capture, rect: &Rect, reference: &GrayImage) -> Option<f64> {
    let (_, gray) = capture.luma_area(rect)?;
    if gray.dimensions() != reference.dimensions() {
        return None;
    }
    image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, &gray, reference)
        .map(|similarity| similarity.score)
        .ok()
}

/// Summed-area tables of pixel values and squared pixel values over one
/// search area, built once per search.
struct IntegralImages {
    left: u32,
    top: u32,
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl IntegralImages {
    fn new(image: &GrayImage, area: &Rect) -> Self {
        let width = area.width() as usize;
        let height = area.height() as usize;
        let image_stride = image.width() as usize;
        let raw = image.as_raw();

        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];

        for row in 0..height {
            let start = (area.y() as usize + row) * image_stride + area.x() as usize;
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (col, &pixel) in raw[start..start + width].iter().enumerate() {
                let pixel = u64::from(pixel);
                row_sum += pixel;
                row_sum_sq += pixel * pixel;

                let at = (row + 1) * stride + col + 1;
                sum[at] = sum[at - stride] + row_sum;
                sum_sq[at] = sum_sq[at - stride] + row_sum_sq;
            }
        }

        Self {
            left: area.x(),
            top: area.y(),
            stride,
            sum,
            sum_sq,
        }
    }

    /// Sum and sum of squares of the window at image coordinates `(x, y)`
    fn window(&self, x: u32, y: u32, width: u32, height: u32) -> (u64, u64) {
        let x0 = (x - self.left) as usize;
        let y0 = (y - self.top) as usize;
        let x1 = x0 + width as usize;
        let y1 = y0 + height as usize;

        let corners = |table: &[u64]| {
            table[y1 * self.stride + x1] + table[y0 * self.stride + x0]
                - table[y0 * self.stride + x1]
                - table[y1 * self.stride + x0]
        };
        (corners(&self.sum[..]), corners(&self.sum_sq[..]))
    }
}

/// Template pixels and their sums, computed once per search
struct TemplateStats {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    count: u128,
    sum: u128,
    /// `count * sum_sq - sum^2`, zero exactly when the template is flat
    spread: u128,
}

impl TemplateStats {
    fn new(template: &GrayImage) -> Self {
        let pixels = template.as_raw().clone();
        let count = pixels.len() as u128;
        let sum: u128 = pixels.iter().map(|&p| u128::from(p)).sum();
        let sum_sq: u128 = pixels.iter().map(|&p| u128::from(p) * u128::from(p)).sum();

        Self {
            width: template.width(),
            height: template.height(),
            pixels,
            count,
            sum,
            spread: count * sum_sq - sum * sum,
        }
    }

    fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// ZNCC between the template and the window with top-left corner `(x, y)`
    fn score_at(&self, haystack: &GrayImage, integrals: &IntegralImages, x: u32, y: u32) -> f64 {
        let (window_sum, window_sum_sq) = integrals.window(x, y, self.width, self.height);
        let window_sum = u128::from(window_sum);
        let window_spread = self.count * u128::from(window_sum_sq) - window_sum * window_sum;

        let template_flat = self.spread == 0;
        let window_flat = window_spread == 0;
        if template_flat || window_flat {
            let window_mean = window_sum as f64 / self.count as f64;
            let same = template_flat
                && window_flat
                && (self.mean() - window_mean).abs() < FLAT_MEAN_TOLERANCE;
            return if same { 1.0 } else { 0.0 };
        }

        let raw = haystack.as_raw();
        let stride = haystack.width() as usize;
        let width = self.width as usize;
        let mut dot = 0u64;
        for (row, template_row) in self.pixels.chunks_exact(width).enumerate() {
            let start = (y as usize + row) * stride + x as usize;
            dot += raw[start..start + width]
                .iter()
                .zip(template_row)
                .map(|(&a, &b)| u64::from(a) * u64::from(b))
                .sum::<u64>();
        }

        let covariance =
            ((self.count * u128::from(dot)) as i128 - (self.sum * window_sum) as i128) as f64;
        let scale = (self.spread as f64).sqrt() * (window_spread as f64).sqrt();
        (covariance / scale).clamp(0.0, 1.0)
    }
}
