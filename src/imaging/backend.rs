//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify (read dimensions without a full decode) and zoom
//! (decode, render a [`ZoomPlan`](super::params::ZoomPlan), encode JPEG).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image` crate.

use super::params::ZoomParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoomError {
    #[error("zoom must be > 0, got {0}")]
    InvalidZoomFactor(f64),
    #[error("Could not decode image bytes: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl ZoomError {
    /// Whether the failure was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ZoomError::InvalidZoomFactor(_) | ZoomError::Decode(_))
    }
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Both operations take encoded bytes; nothing is retained between calls, so
/// one backend value can serve concurrent requests.
pub trait ImageBackend: Send + Sync {
    /// Read the image dimensions from the encoded header.
    fn identify(&self, bytes: &[u8]) -> Result<Dimensions, ZoomError>;

    /// Decode `bytes`, render `params.plan` at `params.output` size and
    /// return the JPEG encoding.
    fn zoom(&self, bytes: &[u8], params: &ZoomParams) -> Result<Vec<u8>, ZoomError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{Quality, ZoomPlan};
    use std::sync::Mutex;

    /// Mock backend that records operations without touching pixels.
    /// Uses Mutex (not RefCell) so it satisfies the `Sync` bound.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(usize),
        Zoom { input_len: usize, params: ZoomParams },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, bytes: &[u8]) -> Result<Dimensions, ZoomError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(bytes.len()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ZoomError::Decode("No mock dimensions".to_string()))
        }

        fn zoom(&self, bytes: &[u8], params: &ZoomParams) -> Result<Vec<u8>, ZoomError> {
            self.operations.lock().unwrap().push(RecordedOp::Zoom {
                input_len: bytes.len(),
                params: *params,
            });
            Ok(vec![0xFF, 0xD8, 0xFF, 0xD9])
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let result = backend.identify(&[1, 2, 3]).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Identify(3)]);
    }

    #[test]
    fn mock_identify_without_dimensions_is_decode_error() {
        let backend = MockBackend::new();
        assert!(matches!(backend.identify(&[]), Err(ZoomError::Decode(_))));
    }

    #[test]
    fn mock_records_zoom() {
        let backend = MockBackend::new();
        let params = ZoomParams {
            output: Dimensions {
                width: 10,
                height: 10,
            },
            plan: ZoomPlan::Passthrough,
            quality: Quality::new(95),
        };

        backend.zoom(&[0; 16], &params).unwrap();

        let ops = backend.get_operations();
        assert_eq!(
            ops,
            vec![RecordedOp::Zoom {
                input_len: 16,
                params
            }]
        );
    }

    #[test]
    fn client_error_classification() {
        assert!(ZoomError::InvalidZoomFactor(0.0).is_client_error());
        assert!(ZoomError::Decode("x".into()).is_client_error());
        assert!(!ZoomError::Encode("x".into()).is_client_error());
    }
}
