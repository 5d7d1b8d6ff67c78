//! Where a zoom factor comes from.
//!
//! The zoom transform only ever sees an `f64`. Callers pick a [`ZoomSource`]:
//! a [`FixedFactor`] for explicit requests (HTTP form field, CLI flag) or a
//! [`GestureEstimator`] fed with hand landmarks.

use crate::gesture::GestureEstimator;
use crate::imaging::{ImageBackend, ZoomConfig, operations};

/// Anything that can supply a zoom factor for the next frame.
pub trait ZoomSource {
    fn zoom_factor(&self) -> f64;
}

/// A caller-chosen factor, passed through unchanged (validation happens in the transform).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFactor(pub f64);

impl ZoomSource for FixedFactor {
    fn zoom_factor(&self) -> f64 {
        self.0
    }
}

impl ZoomSource for GestureEstimator {
    fn zoom_factor(&self) -> f64 {
        self.current()
    }
}

/// Run the zoom transform with whatever factor `source` currently reports.
pub fn zoom_with(
    backend: &impl ImageBackend,
    bytes: &[u8],
    source: &dyn ZoomSource,
    config: &ZoomConfig,
) -> operations::Result<Vec<u8>> {
    operations::apply_zoom(backend, bytes, source.zoom_factor(), config)
}
