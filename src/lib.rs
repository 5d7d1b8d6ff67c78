//! # hand-zoom
//!
//! Simulated optical zoom over HTTP. A client uploads an image or camera
//! frame with a zoom factor; the service center-crops, scales the crop back
//! to the original size and answers with a JPEG.
//!
//! # Architecture
//!
//! ```text
//!  multipart upload ─► server ─► zoom_source ─► imaging::apply_zoom ─► image/jpeg
//!                                    ▲
//!           hand landmarks ─► gesture (pinch distance → factor)
//! ```
//!
//! The transform is a pure function of (bytes, factor): no state survives a
//! request, so handlers share nothing mutable and run the CPU-bound work on
//! tokio's blocking pool.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The zoom transform: crop geometry, backend trait, `image`-crate backend |
//! | [`zoom_source`] | `ZoomSource` trait: fixed factor or gesture estimate |
//! | [`gesture`] | Pinch-distance zoom estimation and landmark debug overlay |
//! | [`server`] | axum router, handlers, HTTP error mapping |
//! | [`config`] | Layered `hand-zoom.toml` loading, `PORT` override, validation |
//!
//! # Design Decisions
//!
//! ## Zoom-Out Letterboxes
//!
//! A factor below 1.0 asks for a crop larger than the frame. Rather than read
//! outside the image, the area beyond the frame is treated as black padding,
//! so the output is the whole frame shrunk and centered on black. See
//! [`imaging::calculate_letterbox`].
//!
//! ## Bilinear Reference Resize
//!
//! Resizing uses `image::imageops::resize` with `FilterType::Triangle`. Output
//! bytes are reproducible for one `image` release; other resize libraries
//! will differ in the last bits.
//!
//! ## Gesture Tracking Stays Outside
//!
//! Hand landmark detection needs an ML model. This crate starts from the
//! landmarks a tracker produces, which keeps the service a single static
//! binary.

pub mod config;
pub mod gesture;
pub mod imaging;
pub mod server;
pub mod zoom_source;

#[cfg(test)]
pub(crate) mod test_helpers;
