//! Facial landmark types and mouth feature extraction
//!
//! The external tracker streams MediaPipe Face Mesh landmarks as normalized
//! coordinates (0.0 - 1.0). Of the full mesh only the two lip-center points
//! are consumed: index 13 (upper lip) and index 14 (lower lip).

use serde::{Deserialize, Serialize};

/// Face Mesh index of the upper-lip-center landmark
pub const UPPER_LIP_CENTER: usize = 13;

/// Face Mesh index of the lower-lip-center landmark
pub const LOWER_LIP_CENTER: usize = 14;

/// Minimum mouth openness (normalized units) to count as properly open.
/// Fixed calibration value, deliberately not exposed in the config.
pub const MOUTH_OPEN_THRESHOLD: f32 = 0.02;

/// A single normalized facial landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Per-frame mouth measurements derived from the lip landmarks.
///
/// Recomputed every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthState {
    /// Midpoint of the two lip-center landmarks
    pub center: [f32; 2],
    /// Absolute vertical distance between the lip centers
    pub openness: f32,
}

impl MouthState {
    /// Derive mouth measurements from a landmark frame.
    ///
    /// Returns `None` when the frame is too short to contain both lip
    /// centers; callers treat that the same as a lost face.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Option<Self> {
        let upper = landmarks.get(UPPER_LIP_CENTER)?;
        let lower = landmarks.get(LOWER_LIP_CENTER)?;

        Some(Self {
            center: [(upper.x + lower.x) / 2.0, (upper.y + lower.y) / 2.0],
            openness: (lower.y - upper.y).abs(),
        })
    }

    /// Whether the mouth is open wide enough for motion analysis
    pub fn is_properly_open(&self) -> bool {
        self.openness > MOUTH_OPEN_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame with the lip centers at the given positions, padded so the
    /// lip indices exist.
    fn frame_with_lips(upper: Landmark, lower: Landmark) -> Vec<Landmark> {
        let mut frame = vec![Landmark::new(0.5, 0.5); LOWER_LIP_CENTER + 1];
        frame[UPPER_LIP_CENTER] = upper;
        frame[LOWER_LIP_CENTER] = lower;
        frame
    }

    #[test]
    fn test_openness_is_vertical_lip_distance() {
        let frame = frame_with_lips(Landmark::new(0.5, 0.40), Landmark::new(0.5, 0.45));
        let mouth = MouthState::from_landmarks(&frame).unwrap();
        assert!((mouth.openness - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_openness_ignores_lip_order() {
        // Lips swapped vertically still yield a positive distance
        let frame = frame_with_lips(Landmark::new(0.5, 0.45), Landmark::new(0.5, 0.40));
        let mouth = MouthState::from_landmarks(&frame).unwrap();
        assert!((mouth.openness - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_center_is_lip_midpoint() {
        let frame = frame_with_lips(Landmark::new(0.4, 0.40), Landmark::new(0.6, 0.50));
        let mouth = MouthState::from_landmarks(&frame).unwrap();
        assert!((mouth.center[0] - 0.5).abs() < 1e-6);
        assert!((mouth.center[1] - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_short_frame_yields_none() {
        let frame = vec![Landmark::new(0.5, 0.5); 5];
        assert!(MouthState::from_landmarks(&frame).is_none());
        assert!(MouthState::from_landmarks(&[]).is_none());
    }

    #[test]
    fn test_open_threshold() {
        let closed = frame_with_lips(Landmark::new(0.5, 0.40), Landmark::new(0.5, 0.41));
        let mouth = MouthState::from_landmarks(&closed).unwrap();
        assert!(!mouth.is_properly_open());

        let open = frame_with_lips(Landmark::new(0.5, 0.40), Landmark::new(0.5, 0.43));
        let mouth = MouthState::from_landmarks(&open).unwrap();
        assert!(mouth.is_properly_open());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Openness exactly at the threshold does not count as open
        let frame = frame_with_lips(Landmark::new(0.5, 0.40), Landmark::new(0.5, 0.42));
        let mouth = MouthState::from_landmarks(&frame).unwrap();
        assert!((mouth.openness - MOUTH_OPEN_THRESHOLD).abs() < 1e-6);
        assert!(!mouth.is_properly_open());
    }

    #[test]
    fn test_landmark_json_shape() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.5,"y":0.3,"z":-0.01}"#).unwrap();
        assert!((lm.x - 0.5).abs() < 1e-6);
        assert!((lm.z - -0.01).abs() < 1e-6);

        // z is optional on the wire
        let lm: Landmark = serde_json::from_str(r#"{"x":0.1,"y":0.2}"#).unwrap();
        assert_eq!(lm.z, 0.0);
    }
}
