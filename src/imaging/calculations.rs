//! Pure geometry for the zoom transform.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{CropRect, Placement};

/// Calculate the centered crop rectangle for a zoom factor.
///
/// The crop is `floor(W / zoom) × floor(H / zoom)` (never smaller than 1×1),
/// centered with floor division so odd leftovers go to the right/bottom edge.
/// For `zoom < 1.0` the rectangle is larger than the source and its origin is
/// negative.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height)
/// * `zoom` - Magnification, expected to be positive and finite
///
/// # Examples
/// ```
/// # use hand_zoom::imaging::calculate_crop_rect;
/// let rect = calculate_crop_rect((100, 100), 2.0);
/// assert_eq!((rect.x, rect.y, rect.width, rect.height), (25, 25, 50, 50));
/// ```
pub fn calculate_crop_rect(source: (u32, u32), zoom: f64) -> CropRect {
    let (src_w, src_h) = source;

    let width = crop_extent(src_w, zoom);
    let height = crop_extent(src_h, zoom);

    CropRect {
        x: (src_w as i64 - width as i64).div_euclid(2),
        y: (src_h as i64 - height as i64).div_euclid(2),
        width,
        height,
    }
}

/// `max(1, floor(edge / zoom))`, saturating at `u32::MAX` for tiny factors.
fn crop_extent(edge: u32, zoom: f64) -> u32 {
    let extent = (edge as f64 / zoom).floor();
    (extent as u32).max(1)
}

/// Calculate where the source lands when an overhanging crop is resized back
/// to source size.
///
/// Padding the source out to `rect` and scaling that canvas down to `source`
/// is the same as scaling the source by `source / rect` on each axis and
/// centering it on a `source`-sized canvas. Computing it this way avoids ever
/// allocating the oversized canvas.
///
/// # Arguments
/// * `source` - Source image dimensions (width, height); also the output size
/// * `rect` - Crop rectangle from [`calculate_crop_rect`]
pub fn calculate_letterbox(source: (u32, u32), rect: &CropRect) -> Placement {
    let (src_w, src_h) = source;

    let width = scaled_extent(src_w, rect.width);
    let height = scaled_extent(src_h, rect.height);

    Placement {
        x: (src_w as i64 - width as i64).div_euclid(2),
        y: (src_h as i64 - height as i64).div_euclid(2),
        width,
        height,
    }
}

/// `edge * edge / crop`, rounded and clamped to `[1, edge]`.
fn scaled_extent(edge: u32, crop: u32) -> u32 {
    let scaled = (edge as f64 * edge as f64 / crop as f64).round() as u32;
    scaled.clamp(1, edge.max(1))
}
