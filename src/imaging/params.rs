//! Parameter types for the zoom transform.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between [`operations`](super::operations) (which validates input
//! and plans the crop) and the [`backend`](super::backend) (which does the
//! pixel work). Keeping them apart lets tests swap in a recording backend.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`ZoomFactor`]: A validated, strictly positive and finite magnification.
//! - [`CropRect`]: Centered crop rectangle in source pixel space (may overhang for zoom-out).
//! - [`ZoomPlan`]: Which of the three render paths to take.
//! - [`ZoomParams`]: Everything the backend needs for one render.

use super::backend::{Dimensions, ZoomError};

/// Tolerance within which a zoom factor counts as exactly 1.0.
pub const IDENTITY_TOLERANCE: f64 = 1e-6;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// A zoom factor that has passed validation.
///
/// Construction is the only place the `> 0` rule is checked, so anything
/// holding a `ZoomFactor` can skip re-validating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    /// Validate a raw factor. Rejects zero, negatives, NaN and infinities.
    pub fn new(value: f64) -> Result<Self, ZoomError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ZoomError::InvalidZoomFactor(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `true` when the factor is within [`IDENTITY_TOLERANCE`] of 1.0.
    pub fn is_identity(self) -> bool {
        (self.0 - 1.0).abs() < IDENTITY_TOLERANCE
    }
}

/// Centered crop rectangle in source pixel coordinates.
///
/// The origin is signed: for zoom factors below 1.0 the rectangle is larger
/// than the source and starts above/left of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Whether the rectangle lies fully inside `[0, w) × [0, h)`.
    pub fn fits_within(&self, source: Dimensions) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width as i64 <= source.width as i64
            && self.y + self.height as i64 <= source.height as i64
    }
}

/// Where the scaled-down source lands on the output canvas when zooming out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// How the backend should produce the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomPlan {
    /// Re-encode the decoded pixels unchanged.
    Passthrough,
    /// Cut `CropRect` out of the source and stretch it back to full size.
    Crop(CropRect),
    /// Shrink the source into `Placement` on a black canvas.
    Letterbox(Placement),
}

/// Everything the backend needs for one zoom render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomParams {
    /// Output size; always the source size.
    pub output: Dimensions,
    pub plan: ZoomPlan,
    pub quality: Quality,
}
