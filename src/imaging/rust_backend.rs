//! Pure Rust zoom backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `ImageReader::decode`, then `to_rgb8` |
//! | Crop | `image::imageops::crop_imm` |
//! | Resize | `image::imageops::resize` with `FilterType::Triangle` (bilinear) |
//! | Letterbox | `resize` + `image::imageops::overlay` onto a black canvas |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//!
//! `FilterType::Triangle` is the reference resize primitive: output bytes are
//! reproducible for a given `image` release, not across resize libraries.

use super::backend::{Dimensions, ImageBackend, ZoomError};
use super::params::{Quality, ZoomParams, ZoomPlan};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, ImageReader, RgbImage};
use std::io::Cursor;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, ZoomError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ZoomError::Decode(e.to_string()))
}

/// Decode encoded bytes into an 8-bit RGB grid. Alpha and grayscale inputs
/// are converted.
fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ZoomError> {
    reader(bytes)?
        .decode()
        .map(|img| img.to_rgb8())
        .map_err(|e| ZoomError::Decode(e.to_string()))
}

/// Produce the output frame described by `params`.
fn render(source: RgbImage, params: &ZoomParams) -> RgbImage {
    let Dimensions { width, height } = params.output;

    match params.plan {
        ZoomPlan::Passthrough => source,
        ZoomPlan::Crop(rect) => {
            let cropped = imageops::crop_imm(
                &source,
                rect.x.max(0) as u32,
                rect.y.max(0) as u32,
                rect.width,
                rect.height,
            )
            .to_image();
            imageops::resize(&cropped, width, height, FilterType::Triangle)
        }
        ZoomPlan::Letterbox(placement) => {
            let shrunk = imageops::resize(
                &source,
                placement.width,
                placement.height,
                FilterType::Triangle,
            );
            // RgbImage::new is zero-filled, i.e. black.
            let mut canvas = RgbImage::new(width, height);
            imageops::overlay(&mut canvas, &shrunk, placement.x, placement.y);
            canvas
        }
    }
}

/// Encode an RGB grid as baseline JPEG.
fn encode_jpeg(img: &RgbImage, quality: Quality) -> Result<Vec<u8>, ZoomError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.value())
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ZoomError::Encode(e.to_string()))?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, ZoomError> {
        let (width, height) = reader(bytes)?
            .into_dimensions()
            .map_err(|e| ZoomError::Decode(e.to_string()))?;
        Ok(Dimensions { width, height })
    }

    fn zoom(&self, bytes: &[u8], params: &ZoomParams) -> Result<Vec<u8>, ZoomError> {
        let source = decode_rgb(bytes)?;
        let output = render(source, params);
        encode_jpeg(&output, params.quality)
    }
}
