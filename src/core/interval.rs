//! Interval data structure representing one kept range of the source media.

use serde::{Deserialize, Serialize};

use crate::core::time::{self, Time};

/// A kept `[start, end]` range of the source media (nanoseconds).
///
/// Intervals are plain values; ordering and spacing between neighbours is
/// enforced by [`crate::core::Timeline`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: Time,
    pub end: Time,
}

impl Interval {
    /// Create a new interval.
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    /// Create an interval from seconds.
    pub fn from_seconds(start: f64, end: f64) -> Self {
        Self::new(time::from_seconds(start), time::from_seconds(end))
    }

    /// Length of the interval in nanoseconds.
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// Check if a position is within this interval (inclusive on both ends).
    pub fn contains(&self, position: Time) -> bool {
        position >= self.start && position <= self.end
    }

    /// Start in seconds.
    pub fn start_seconds(&self) -> f64 {
        time::to_seconds(self.start)
    }

    /// End in seconds.
    pub fn end_seconds(&self) -> f64 {
        time::to_seconds(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time;

    #[test]
    fn test_interval_duration() {
        let interval = Interval::from_seconds(1.0, 3.0);
        assert_eq!(interval.duration(), time::from_seconds(2.0));
    }

    #[test]
    fn test_interval_contains_is_inclusive() {
        let interval = Interval::from_seconds(2.0, 8.0);

        assert!(interval.contains(time::from_seconds(2.0)));
        assert!(interval.contains(time::from_seconds(8.0)));
        assert!(interval.contains(time::from_seconds(5.0)));
        assert!(!interval.contains(time::from_seconds(8.001)));
        assert!(!interval.contains(time::from_seconds(1.999)));
    }
}
