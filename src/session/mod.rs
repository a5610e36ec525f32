//! Brushing session schedule and scoring
//!
//! A session lasts three minutes, split evenly across four brushing zones.
//! The clock maps elapsed session time to the active zone; a completed
//! session awards a fixed point bonus.

use std::time::Duration;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Points awarded for finishing a full session
pub const POINTS_PER_SESSION: u32 = 10;

/// The four brushing zones, in schedule order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    UpperFront,
    LeftMolar,
    RightMolar,
    LowerFront,
}

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::UpperFront,
        Zone::LeftMolar,
        Zone::RightMolar,
        Zone::LowerFront,
    ];

    /// Position of this zone in the schedule (0-3)
    pub fn index(self) -> usize {
        match self {
            Zone::UpperFront => 0,
            Zone::LeftMolar => 1,
            Zone::RightMolar => 2,
            Zone::LowerFront => 3,
        }
    }

    /// Zone for an external 0-3 index
    pub fn from_index(index: usize) -> Result<Self, SessionError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(SessionError::InvalidZone(index))
    }

    /// Display label used in coaching feedback
    pub fn label(self) -> &'static str {
        match self {
            Zone::UpperFront => "upper front teeth",
            Zone::LeftMolar => "left molars",
            Zone::RightMolar => "right molars",
            Zone::LowerFront => "lower front teeth",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps elapsed session time to the active zone.
///
/// Zone durations come from config (45 seconds each by default); the
/// schedule always covers the four zones in `Zone::ALL` order.
#[derive(Debug, Clone)]
pub struct SessionClock {
    zone_duration: Duration,
}

impl SessionClock {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            zone_duration: Duration::from_secs(config.zone_duration_secs),
        }
    }

    /// Total session length
    pub fn total(&self) -> Duration {
        self.zone_duration * Zone::ALL.len() as u32
    }

    /// The zone active at `elapsed`. Past the end of the schedule the last
    /// zone stays active.
    pub fn zone_at(&self, elapsed: Duration) -> Zone {
        let index = (elapsed.as_secs() / self.zone_duration.as_secs().max(1)) as usize;
        Zone::ALL[index.min(Zone::ALL.len() - 1)]
    }

    /// Session progress in [0.0, 1.0]
    pub fn progress(&self, elapsed: Duration) -> f32 {
        (elapsed.as_secs_f32() / self.total().as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total()
    }
}

/// Coarse time-of-day bucket for session records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Bucket for an hour of day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    /// Bucket for the current local time
    pub fn now() -> Self {
        Self::from_hour(chrono::Local::now().hour())
    }
}

/// Outcome of one brushing session. Pure bookkeeping, nothing is persisted
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub completed: bool,
    pub duration_secs: u64,
    pub final_score: u32,
    pub points: u32,
    pub time: TimeOfDay,
}

impl SessionSummary {
    pub fn new(completed: bool, duration: Duration, final_score: u32, time: TimeOfDay) -> Self {
        Self {
            completed,
            duration_secs: duration.as_secs(),
            final_score,
            points: if completed { POINTS_PER_SESSION } else { 0 },
            time,
        }
    }
}
