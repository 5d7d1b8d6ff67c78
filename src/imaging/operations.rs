//! High-level zoom operations.
//!
//! These functions combine calculations with backend execution.
//! They validate the factor, read dimensions, plan the render and hand the
//! plan to the backend.

use super::backend::{Dimensions, ImageBackend, ZoomError};
use super::calculations::{calculate_crop_rect, calculate_letterbox};
use super::params::{Quality, ZoomFactor, ZoomParams, ZoomPlan};
use tracing::debug;

/// Result type for zoom operations.
pub type Result<T> = std::result::Result<T, ZoomError>;

/// Encoding settings for the zoom transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomConfig {
    /// JPEG quality for cropped and letterboxed output.
    pub quality: Quality,
    /// JPEG quality when the factor is 1.0 and pixels are re-encoded untouched.
    pub passthrough_quality: Quality,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            passthrough_quality: Quality::new(95),
        }
    }
}

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, bytes: &[u8]) -> Result<(u32, u32)> {
    let dims = backend.identify(bytes)?;
    Ok(dims.as_tuple())
}

/// Plan a zoom render without executing it.
///
/// - identity factor → [`ZoomPlan::Passthrough`] at passthrough quality
/// - crop inside the source → [`ZoomPlan::Crop`]
/// - crop overhanging the source (zoom < 1) → [`ZoomPlan::Letterbox`]
pub fn plan_zoom(source: Dimensions, zoom: ZoomFactor, config: &ZoomConfig) -> ZoomParams {
    if zoom.is_identity() {
        return ZoomParams {
            output: source,
            plan: ZoomPlan::Passthrough,
            quality: config.passthrough_quality,
        };
    }

    let rect = calculate_crop_rect(source.as_tuple(), zoom.value());
    let plan = if rect.fits_within(source) {
        ZoomPlan::Crop(rect)
    } else {
        ZoomPlan::Letterbox(calculate_letterbox(source.as_tuple(), &rect))
    };

    ZoomParams {
        output: source,
        plan,
        quality: config.quality,
    }
}

/// Zoom an encoded image, returning JPEG bytes of the same pixel size.
///
/// The factor is validated before the bytes are looked at, so a bad factor
/// never costs a decode.
pub fn apply_zoom(
    backend: &impl ImageBackend,
    bytes: &[u8],
    zoom: f64,
    config: &ZoomConfig,
) -> Result<Vec<u8>> {
    let zoom = ZoomFactor::new(zoom)?;
    let source = backend.identify(bytes)?;
    let params = plan_zoom(source, zoom, config);
    debug!(
        width = source.width,
        height = source.height,
        zoom = zoom.value(),
        plan = ?params.plan,
        "zoom planned"
    );
    backend.zoom(bytes, &params)
}
