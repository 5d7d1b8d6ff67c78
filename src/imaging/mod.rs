//! Zoom transform: decode → crop geometry → bilinear resize → JPEG encode.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Crop geometry** | [`calculate_crop_rect`], [`calculate_letterbox`] |
//! | **Resize** | `image::imageops::resize` (Triangle = bilinear) |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop math (unit testable)
//! - **Parameters**: Data structures describing a render
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`apply_zoom`], combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{Dimensions, ImageBackend, ZoomError};
pub use calculations::{calculate_crop_rect, calculate_letterbox};
pub use operations::{ZoomConfig, apply_zoom, get_dimensions, plan_zoom};
pub use params::{CropRect, Placement, Quality, ZoomFactor, ZoomParams, ZoomPlan};
pub use rust_backend::RustBackend;
