//! Brushing motion classifier
//!
//! Per-frame state machine over a sliding window of mouth positions. Each
//! delivered frame either updates the coaching feedback without touching the
//! window (no face, mouth closed) or appends a position sample and
//! classifies the aggregate movement across the most recent window.

use serde::{Deserialize, Serialize};

use crate::analysis::history::{PositionHistory, PositionSample};
use crate::session::Zone;
use crate::tracking::landmarks::{Landmark, MouthState};

/// Samples needed before movement can be classified
pub const MIN_WINDOW_SAMPLES: usize = 5;

/// Minimum aggregate movement (sum of per-axis deltas across the window)
/// for the motion to count as active brushing. Fixed calibration value.
pub const MOVEMENT_THRESHOLD: f32 = 0.01;

/// Maximum reachable score
pub const MAX_SCORE: u32 = 100;

const FEEDBACK_INITIAL: &str = "Look into the camera and start brushing!";
const FEEDBACK_NO_FACE: &str = "Adjust your position so your face is visible in the camera!";
const FEEDBACK_MOUTH_CLOSED: &str = "Open your mouth a little wider!";
const FEEDBACK_START_MOTION: &str = "Start your brushing motion!";
const FEEDBACK_MORE_MOTION: &str = "Try a more active brushing motion!";

/// Analyzer output published to collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisState {
    /// Brushing quality score (0-100)
    pub score: u32,
    /// Human-readable coaching feedback
    pub feedback: String,
    /// Whether the current motion counts as valid brushing
    pub is_correct_motion: bool,
}

impl Default for AnalysisState {
    fn default() -> Self {
        Self {
            score: 0,
            feedback: FEEDBACK_INITIAL.to_string(),
            is_correct_motion: false,
        }
    }
}

/// Sliding-window brushing motion analyzer.
///
/// Owns the position history and the published score/feedback state. One
/// call to [`update`](Self::update) per delivered video frame; the caller
/// owns scheduling and frame-rate throttling.
#[derive(Debug, Default)]
pub struct BrushingAnalyzer {
    history: PositionHistory,
    current_zone: Option<Zone>,
    state: AnalysisState,
}

impl BrushingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published state
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// Number of buffered position samples
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear all session state: history, score, and feedback
    pub fn reset(&mut self) {
        self.history.clear();
        self.current_zone = None;
        self.state = AnalysisState::default();
    }

    /// Process one frame.
    ///
    /// `frame` is `None` when the tracker delivered nothing this tick and an
    /// empty slice when it reported no detected face. Switching `zone`
    /// clears the position history, so a fresh window must accumulate before
    /// the new zone can produce a positive verdict.
    pub fn update(&mut self, frame: Option<&[Landmark]>, zone: Zone, active: bool) -> AnalysisState {
        let landmarks = match frame {
            Some(landmarks) if active => landmarks,
            // Nothing delivered or analysis paused: keep the previous state
            _ => return self.state.clone(),
        };

        if self.current_zone != Some(zone) {
            self.history.clear();
            self.current_zone = Some(zone);
        }

        if landmarks.is_empty() {
            return self.publish(FEEDBACK_NO_FACE.to_string(), false);
        }

        // A frame too short to carry the lip landmarks is treated like a
        // lost face rather than a hard error.
        let mouth = match MouthState::from_landmarks(landmarks) {
            Some(mouth) => mouth,
            None => return self.publish(FEEDBACK_NO_FACE.to_string(), false),
        };

        if !mouth.is_properly_open() {
            return self.publish(FEEDBACK_MOUTH_CLOSED.to_string(), false);
        }

        self.history.push(PositionSample::new(mouth.center));

        let window = self.history.recent(MIN_WINDOW_SAMPLES);
        if window.len() < MIN_WINDOW_SAMPLES {
            return self.publish(FEEDBACK_START_MOTION.to_string(), false);
        }

        if total_movement(&window) <= MOVEMENT_THRESHOLD {
            return self.publish(FEEDBACK_MORE_MOTION.to_string(), false);
        }

        self.state.score = (self.state.score + 1).min(MAX_SCORE);
        self.publish(format!("Great! Your {} are getting clean!", zone.label()), true)
    }

    fn publish(&mut self, feedback: String, is_correct_motion: bool) -> AnalysisState {
        self.state.feedback = feedback;
        self.state.is_correct_motion = is_correct_motion;
        self.state.clone()
    }
}

/// Aggregate movement across a window: per-axis absolute deltas between
/// consecutive samples, summed over both axes.
fn total_movement(window: &[PositionSample]) -> f32 {
    window
        .windows(2)
        .map(|pair| {
            (pair[1].center[0] - pair[0].center[0]).abs()
                + (pair[1].center[1] - pair[0].center[1]).abs()
        })
        .sum()
}
