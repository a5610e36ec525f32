//! Fixed-capacity position history
//!
//! Backing store for the motion window: a small ring buffer over an inline
//! array with a head index. Oldest samples are evicted first; a zone change
//! clears the whole buffer.

use std::time::Instant;

/// Maximum number of retained position samples
pub const HISTORY_CAPACITY: usize = 10;

/// One observed mouth-center position
#[derive(Debug, Clone, Copy)]
pub struct PositionSample {
    /// Mouth center in normalized coordinates
    pub center: [f32; 2],
    /// When the sample was taken
    pub timestamp: Instant,
}

impl PositionSample {
    pub fn new(center: [f32; 2]) -> Self {
        Self {
            center,
            timestamp: Instant::now(),
        }
    }
}

/// Ring buffer of the most recent mouth positions
#[derive(Debug)]
pub struct PositionHistory {
    samples: [Option<PositionSample>; HISTORY_CAPACITY],
    /// Next slot to write
    head: usize,
    len: usize,
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionHistory {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    /// Append a sample, evicting the oldest one at capacity
    pub fn push(&mut self, sample: PositionSample) {
        self.samples[self.head] = Some(sample);
        self.head = (self.head + 1) % HISTORY_CAPACITY;
        if self.len < HISTORY_CAPACITY {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_CAPACITY];
        self.head = 0;
        self.len = 0;
    }

    /// The most recent `count` samples in chronological order (fewer if the
    /// buffer holds fewer).
    pub fn recent(&self, count: usize) -> Vec<PositionSample> {
        let take = count.min(self.len);
        let mut window = Vec::with_capacity(take);
        for i in 0..take {
            let slot = (self.head + HISTORY_CAPACITY - take + i) % HISTORY_CAPACITY;
            if let Some(sample) = self.samples[slot] {
                window.push(sample);
            }
        }
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f32) -> PositionSample {
        PositionSample::new([x, 0.0])
    }

    #[test]
    fn test_push_and_len() {
        let mut history = PositionHistory::new();
        assert!(history.is_empty());

        history.push(sample(0.1));
        history.push(sample(0.2));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = PositionHistory::new();
        for i in 0..15 {
            history.push(sample(i as f32));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // Oldest surviving sample is #5 (0-4 were evicted)
        let window = history.recent(HISTORY_CAPACITY);
        assert_eq!(window.len(), HISTORY_CAPACITY);
        assert_eq!(window[0].center[0], 5.0);
        assert_eq!(window[9].center[0], 14.0);
    }

    #[test]
    fn test_recent_is_chronological() {
        let mut history = PositionHistory::new();
        for i in 0..7 {
            history.push(sample(i as f32));
        }

        let window = history.recent(5);
        let xs: Vec<f32> = window.iter().map(|s| s.center[0]).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_recent_with_short_history() {
        let mut history = PositionHistory::new();
        history.push(sample(1.0));
        history.push(sample(2.0));

        let window = history.recent(5);
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].center[0], 1.0);
        assert_eq!(window[1].center[0], 2.0);
    }

    #[test]
    fn test_clear() {
        let mut history = PositionHistory::new();
        for i in 0..4 {
            history.push(sample(i as f32));
        }
        history.clear();
        assert!(history.is_empty());
        assert!(history.recent(5).is_empty());

        // Reusable after clearing
        history.push(sample(9.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.recent(5)[0].center[0], 9.0);
    }

    #[test]
    fn test_recent_after_wraparound() {
        let mut history = PositionHistory::new();
        for i in 0..23 {
            history.push(sample(i as f32));
        }

        let window = history.recent(5);
        let xs: Vec<f32> = window.iter().map(|s| s.center[0]).collect();
        assert_eq!(xs, vec![18.0, 19.0, 20.0, 21.0, 22.0]);
    }
}
