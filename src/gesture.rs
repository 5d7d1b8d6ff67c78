//! Pinch-gesture zoom estimation.
//!
//! Hand tracking itself happens outside this crate: an external pose model
//! (MediaPipe Hands or similar) produces 21 normalized landmarks per hand, and
//! this module turns the thumb-tip/index-tip distance into a zoom factor.
//!
//! ```text
//! landmarks (normalized) ──► pixel coords ──► pinch distance ──► clamp(d / step, min, max)
//! ```
//!
//! Landmark files are JSON:
//!
//! ```json
//! { "hands": [ { "landmarks": [ { "x": 0.51, "y": 0.62 }, ... 21 points ... ] } ] }
//! ```
//!
//! Extra per-point fields (e.g. `z`, `visibility`) are ignored.

use crate::config::GestureConfig;
use crate::imaging::Dimensions;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Landmark index of the thumb tip.
pub const THUMB_TIP: usize = 4;
/// Landmark index of the index fingertip.
pub const INDEX_FINGER_TIP: usize = 8;

/// Bone connections of the 21-point hand model, for the debug overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

const LANDMARK_COLOR: Rgb<u8> = Rgb([255, 48, 48]);
const CONNECTION_COLOR: Rgb<u8> = Rgb([224, 224, 224]);
const LANDMARK_RADIUS: i32 = 3;
/// How far outside the frame overlay points may sit before they are pinned.
const OVERLAY_MARGIN: i64 = 16;

/// One landmark in normalized image coordinates (`0.0..=1.0` on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    /// Pixel position in a frame, truncated toward zero.
    pub fn to_pixel(self, frame: Dimensions) -> (i64, i64) {
        (
            (self.x * frame.width as f64) as i64,
            (self.y * frame.height as f64) as i64,
        )
    }
}

/// All landmarks of one detected hand, in model order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub landmarks: Vec<Landmark>,
}

/// Every hand the tracker reported for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

/// Pixel distance between thumb tip and index fingertip.
///
/// Returns `None` when the hand is missing either landmark.
pub fn pinch_distance(hand: &HandLandmarks, frame: Dimensions) -> Option<f64> {
    let (x1, y1) = hand.landmarks.get(THUMB_TIP)?.to_pixel(frame);
    let (x2, y2) = hand.landmarks.get(INDEX_FINGER_TIP)?.to_pixel(frame);
    Some(((x2 - x1) as f64).hypot((y2 - y1) as f64))
}

/// Map a pinch distance onto the configured zoom range.
pub fn zoom_from_distance(distance: f64, config: &GestureConfig) -> f64 {
    (distance / config.pixels_per_step)
        .min(config.max_zoom)
        .max(config.min_zoom)
}

/// Stateful estimator that remembers the last zoom between frames.
///
/// A frame without hands leaves the estimate where it was, so the zoom does
/// not snap back when tracking drops out for a frame.
#[derive(Debug, Clone)]
pub struct GestureEstimator {
    config: GestureConfig,
    zoom: f64,
}

impl GestureEstimator {
    pub fn new(config: GestureConfig) -> Self {
        Self { config, zoom: 1.0 }
    }

    /// Current estimate.
    pub fn current(&self) -> f64 {
        self.zoom
    }

    /// Feed the hands detected in one frame and return the updated estimate.
    ///
    /// Hands are applied in order; with several hands the last usable one wins.
    pub fn observe(&mut self, hands: &[HandLandmarks], frame: Dimensions) -> f64 {
        for hand in hands {
            if let Some(distance) = pinch_distance(hand, frame) {
                self.zoom = zoom_from_distance(distance, &self.config);
                debug!(distance, zoom = self.zoom, "pinch observed");
            }
        }
        self.zoom
    }
}

/// Draw landmark dots and hand connections onto a frame for debugging.
///
/// Connections referencing missing landmarks are skipped.
pub fn draw_landmarks(frame: &mut RgbImage, hand: &HandLandmarks) {
    let dims = Dimensions {
        width: frame.width(),
        height: frame.height(),
    };
    let points: Vec<(i32, i32)> = hand
        .landmarks
        .iter()
        .map(|l| overlay_point(l.to_pixel(dims), dims))
        .collect();

    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(&(x1, y1)), Some(&(x2, y2))) = (points.get(a), points.get(b)) {
            draw_line_segment_mut(
                frame,
                (x1 as f32, y1 as f32),
                (x2 as f32, y2 as f32),
                CONNECTION_COLOR,
            );
        }
    }
    for &(x, y) in &points {
        draw_filled_circle_mut(frame, (x, y), LANDMARK_RADIUS, LANDMARK_COLOR);
    }
}

/// Pin a pixel position to a small band around the frame.
///
/// Line drawing visits every point of a segment, so far-off landmarks would
/// otherwise cost time proportional to their distance.
fn overlay_point((x, y): (i64, i64), frame: Dimensions) -> (i32, i32) {
    let pin = |v: i64, edge: u32| {
        let hi = (edge as i64 + OVERLAY_MARGIN).min(i32::MAX as i64);
        v.clamp(-OVERLAY_MARGIN, hi) as i32
    };
    (pin(x, frame.width), pin(y, frame.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// A 21-point hand centered in the frame, except for the thumb and index tips.
    fn hand_with_tips(thumb: (f64, f64), index: (f64, f64)) -> HandLandmarks {
        let mut landmarks = vec![Landmark { x: 0.5, y: 0.5 }; 21];
        landmarks[THUMB_TIP] = Landmark {
            x: thumb.0,
            y: thumb.1,
        };
        landmarks[INDEX_FINGER_TIP] = Landmark {
            x: index.0,
            y: index.1,
        };
        HandLandmarks { landmarks }
    }

    #[test]
    fn connections_reference_valid_landmarks() {
        assert!(HAND_CONNECTIONS.iter().all(|&(a, b)| a < 21 && b < 21));
    }

    #[test]
    fn pinch_distance_in_pixels() {
        // 0.125 apart horizontally on an 800px-wide frame → 100px
        let hand = hand_with_tips((0.25, 0.5), (0.375, 0.5));
        assert_eq!(pinch_distance(&hand, frame(800, 600)), Some(100.0));
    }

    #[test]
    fn pinch_distance_truncates_to_whole_pixels() {
        // 0.1234 * 100 = 12.34 → 12; 0.0 → 0
        let hand = hand_with_tips((0.0, 0.0), (0.1234, 0.0));
        assert_eq!(pinch_distance(&hand, frame(100, 100)), Some(12.0));
    }

    #[test]
    fn pinch_distance_diagonal() {
        // (0,0) → (30,40) = 50
        let hand = hand_with_tips((0.0, 0.0), (0.375, 0.5));
        assert_eq!(pinch_distance(&hand, frame(80, 80)), Some(50.0));
    }

    #[test]
    fn pinch_distance_needs_both_tips() {
        let hand = HandLandmarks {
            landmarks: vec![Landmark { x: 0.0, y: 0.0 }; 5],
        };
        assert_eq!(pinch_distance(&hand, frame(100, 100)), None);
    }

    #[test]
    fn zoom_mapping_is_linear_then_clamped() {
        let config = GestureConfig::default();
        assert_eq!(zoom_from_distance(100.0, &config), 2.0);
        assert_eq!(zoom_from_distance(75.0, &config), 1.5);
        assert_eq!(zoom_from_distance(10.0, &config), 1.0);
        assert_eq!(zoom_from_distance(400.0, &config), 3.0);
    }

    #[test]
    fn estimator_starts_at_identity() {
        let estimator = GestureEstimator::new(GestureConfig::default());
        assert_eq!(estimator.current(), 1.0);
    }

    #[test]
    fn estimator_keeps_zoom_when_hand_disappears() {
        let mut estimator = GestureEstimator::new(GestureConfig::default());
        let hand = hand_with_tips((0.25, 0.5), (0.375, 0.5));

        assert_eq!(estimator.observe(&[hand], frame(800, 800)), 2.0);
        assert_eq!(estimator.observe(&[], frame(800, 800)), 2.0);
    }

    #[test]
    fn estimator_last_hand_wins() {
        let mut estimator = GestureEstimator::new(GestureConfig::default());
        let wide = hand_with_tips((0.0, 0.5), (0.5, 0.5)); // 400px → 3.0 (clamped from 8)
        let close = hand_with_tips((0.5, 0.5), (0.625, 0.5)); // 100px → 2.0

        let zoom = estimator.observe(&[wide, close], frame(800, 800));
        assert_eq!(zoom, 2.0);
    }

    #[test]
    fn estimator_ignores_incomplete_hands() {
        let mut estimator = GestureEstimator::new(GestureConfig::default());
        let partial = HandLandmarks {
            landmarks: vec![Landmark { x: 0.9, y: 0.9 }; 3],
        };
        assert_eq!(estimator.observe(&[partial], frame(640, 480)), 1.0);
    }

    #[test]
    fn landmark_frame_parses_mediapipe_style_json() {
        let json = r#"{"hands":[{"landmarks":[{"x":0.1,"y":0.2,"z":-0.03}]}]}"#;
        let parsed: LandmarkFrame = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.hands.len(), 1);
        assert_eq!(parsed.hands[0].landmarks[0], Landmark { x: 0.1, y: 0.2 });
    }

    #[test]
    fn landmark_frame_without_hands_is_empty() {
        let parsed: LandmarkFrame = serde_json::from_str("{}").unwrap();
        assert!(parsed.hands.is_empty());
    }

    #[test]
    fn overlay_marks_landmarks() {
        let mut img = RgbImage::new(100, 100);
        let hand = hand_with_tips((0.2, 0.2), (0.8, 0.8));
        draw_landmarks(&mut img, &hand);

        assert_eq!(*img.get_pixel(20, 20), LANDMARK_COLOR);
        assert_eq!(*img.get_pixel(80, 80), LANDMARK_COLOR);
        assert_eq!(*img.get_pixel(0, 99), Rgb([0, 0, 0]));
    }

    #[test]
    fn overlay_point_pins_far_coordinates() {
        let dims = frame(100, 50);
        assert_eq!(overlay_point((20, 30), dims), (20, 30));
        assert_eq!(overlay_point((-5, 60), dims), (-5, 60));
        assert_eq!(
            overlay_point((i64::MAX, i64::MIN), dims),
            (100 + OVERLAY_MARGIN as i32, -(OVERLAY_MARGIN as i32))
        );
        // Would wrap to a negative i32 without pinning.
        assert_eq!(overlay_point((1 << 32, 0), dims).0, 116);
    }

    #[test]
    fn overlay_with_huge_landmarks_finishes_and_stays_in_bounds() {
        let mut img = RgbImage::new(20, 20);
        let hand = hand_with_tips((-1e12, 5e11), (1e15, -1e15));
        draw_landmarks(&mut img, &hand);
        assert_eq!(img.dimensions(), (20, 20));
        // The centered palm points are still drawn.
        assert_eq!(*img.get_pixel(10, 10), LANDMARK_COLOR);
    }

    #[test]
    fn overlay_tolerates_out_of_frame_points() {
        let mut img = RgbImage::new(10, 10);
        let hand = hand_with_tips((-0.5, -0.5), (1.5, 1.5));
        draw_landmarks(&mut img, &hand);
        assert_eq!(img.dimensions(), (10, 10));
    }
}
