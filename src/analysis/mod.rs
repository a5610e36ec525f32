//! Brushing motion analysis
//!
//! Feature extraction and temporal-window classification:
//! - per-frame mouth measurements derived from the lip landmarks
//! - a bounded position history feeding a movement window
//! - the classifier that turns window movement into score and feedback

pub mod history;
pub mod motion;

pub use history::{PositionHistory, PositionSample, HISTORY_CAPACITY};
pub use motion::{AnalysisState, BrushingAnalyzer, MIN_WINDOW_SAMPLES, MOVEMENT_THRESHOLD};
