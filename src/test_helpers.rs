//! Shared test utilities for the hand-zoom test suite.
//!
//! Builds synthetic images in memory, encodes them to the formats clients
//! upload, and compares decoded output with a per-channel tolerance.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let bytes = png_bytes(&solid_image(100, 100, [255, 0, 0]));
//! let out = apply_zoom(&RustBackend::new(), &bytes, 2.0, &ZoomConfig::default()).unwrap();
//! assert_pixel_near(&decode_jpeg(&out), 50, 50, [255, 0, 0], 8);
//! ```

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

// =========================================================================
// Synthetic images
// =========================================================================

/// A single-color image.
pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// A smooth two-axis gradient; compresses predictably and has no flat regions.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

// =========================================================================
// Encoding / decoding
// =========================================================================

/// Lossless PNG encoding, for inputs whose exact pixels matter.
pub fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// JPEG encoding at the `image` crate's default quality.
pub fn jpeg_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Vec::new();
    JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Decode transform output, asserting it really is a JPEG.
pub fn decode_jpeg(bytes: &[u8]) -> RgbImage {
    assert_eq!(
        image::guess_format(bytes).unwrap(),
        ImageFormat::Jpeg,
        "output is not a JPEG"
    );
    image::load_from_memory(bytes).unwrap().to_rgb8()
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert that every channel of pixel `(x, y)` is within `tolerance` of `expected`.
pub fn assert_pixel_near(img: &RgbImage, x: u32, y: u32, expected: [u8; 3], tolerance: u8) {
    let actual = img.get_pixel(x, y).0;
    for (channel, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a.abs_diff(e) <= tolerance,
            "pixel ({x}, {y}) channel {channel}: got {actual:?}, expected {expected:?} ±{tolerance}"
        );
    }
}

/// Mean absolute per-channel difference between two same-sized images.
pub fn mean_abs_diff(a: &RgbImage, b: &RgbImage) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions());
    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(&x, &y)| x.abs_diff(y) as u64)
        .sum();
    total as f64 / a.as_raw().len() as f64
}
