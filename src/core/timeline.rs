//! Timeline model: the ordered list of kept intervals over one media file.
//!
//! A `Timeline` is an immutable value. Every edit returns a new `Timeline`
//! or an [`EditError`] describing why the edit was refused; the previous value
//! is never touched. Callers that want "sticky" drag behaviour simply keep the
//! old value when an edit is refused.

use crate::core::config::TrimConfig;
use crate::core::interval::Interval;
use crate::core::time::{self, Time};

/// Error type for timeline edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Media duration {0}ns is not usable")]
    InvalidDuration(Time),
    #[error("No interval at index {index} (timeline has {len})")]
    NoSuchInterval { index: usize, len: usize },
    #[error("Proposed {kind} {proposed}ns for interval {index} is outside ({min}ns, {max}ns)")]
    OutOfRange {
        index: usize,
        kind: &'static str,
        proposed: Time,
        min: Time,
        max: Time,
    },
    #[error("Cannot delete the last remaining interval")]
    LastInterval,
    #[error("No room left after the last interval")]
    TimelineFull,
    #[error("Timeline has no intervals")]
    Empty,
    #[error("Interval {index} is empty or reversed")]
    Reversed { index: usize },
    #[error("Interval {index} lies outside [0, duration]")]
    OutOfBounds { index: usize },
    #[error("Intervals {index} and {next} are unsorted or closer than the gap tolerance")]
    GapViolation { index: usize, next: usize },
}

/// Which end of an interval is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    Start,
    End,
}

impl BoundaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Start => "start",
            BoundaryKind::End => "end",
        }
    }
}

/// Ordered, non-empty sequence of kept intervals.
///
/// Invariants (see [`Timeline::validate`]):
/// - at least one interval;
/// - sorted by `start`;
/// - `intervals[i].end + gap <= intervals[i + 1].start`;
/// - every interval satisfies `0 <= start < end <= duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    intervals: Vec<Interval>,
    duration: Time,
    config: TrimConfig,
}

impl Timeline {
    /// Seed a timeline covering the whole media: `[{0, duration}]`.
    pub fn initialize(duration: Time, config: TrimConfig) -> Result<Self, EditError> {
        if duration <= 0 {
            return Err(EditError::InvalidDuration(duration));
        }
        Ok(Self {
            intervals: vec![Interval::new(0, duration)],
            duration,
            config,
        })
    }

    /// Seed a timeline from a media duration reported in seconds.
    /// NaN, infinite, non-positive and unrepresentably long durations are refused.
    pub fn initialize_seconds(duration: f64, config: TrimConfig) -> Result<Self, EditError> {
        if !duration.is_finite() {
            return Err(EditError::InvalidDuration(0));
        }
        // Durations that do not fit in i64 nanoseconds would saturate
        if duration >= time::to_seconds(Time::MAX) {
            return Err(EditError::InvalidDuration(Time::MAX));
        }
        Self::initialize(time::from_seconds(duration), config)
    }

    /// Build a timeline from explicit intervals, checking every invariant.
    pub fn from_intervals(
        duration: Time,
        intervals: Vec<Interval>,
        config: TrimConfig,
    ) -> Result<Self, EditError> {
        if duration <= 0 {
            return Err(EditError::InvalidDuration(duration));
        }
        let timeline = Self {
            intervals,
            duration,
            config,
        };
        timeline.validate()?;
        Ok(timeline)
    }

    /// Check every invariant.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.intervals.is_empty() {
            return Err(EditError::Empty);
        }
        let gap = self.config.gap();
        for (index, interval) in self.intervals.iter().enumerate() {
            if interval.start >= interval.end {
                return Err(EditError::Reversed { index });
            }
            if interval.start < 0 || interval.end > self.duration {
                return Err(EditError::OutOfBounds { index });
            }
            if let Some(next) = self.intervals.get(index + 1) {
                if interval.end.saturating_add(gap) > next.start {
                    return Err(EditError::GapViolation {
                        index,
                        next: index + 1,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always false for a valid timeline; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    /// First kept interval.
    pub fn first(&self) -> Interval {
        self.intervals[0]
    }

    /// Last kept interval.
    pub fn last(&self) -> Interval {
        self.intervals[self.intervals.len() - 1]
    }

    /// Move one boundary of `intervals[index]` to `proposed`.
    ///
    /// The proposal must lie strictly inside the valid range; anything else is
    /// refused with [`EditError::OutOfRange`] and is not clamped.
    ///
    /// - `Start`: `(prev.end + gap, end - gap)`; the lower bound is `0` for the first interval.
    /// - `End`: `(start + gap, next.start - gap)`; the upper bound is `duration` for the last interval.
    pub fn resize_boundary(
        &self,
        index: usize,
        kind: BoundaryKind,
        proposed: Time,
    ) -> Result<Self, EditError> {
        let interval = *self.intervals.get(index).ok_or(EditError::NoSuchInterval {
            index,
            len: self.intervals.len(),
        })?;
        let gap = self.config.gap();

        let (min, max) = match kind {
            BoundaryKind::Start => {
                let min = match index {
                    0 => 0,
                    _ => self.intervals[index - 1].end.saturating_add(gap),
                };
                (min, interval.end - gap)
            }
            BoundaryKind::End => {
                let max = match self.intervals.get(index + 1) {
                    Some(next) => next.start - gap,
                    None => self.duration,
                };
                (interval.start.saturating_add(gap), max)
            }
        };

        if proposed <= min || proposed >= max {
            return Err(EditError::OutOfRange {
                index,
                kind: kind.as_str(),
                proposed,
                min,
                max,
            });
        }

        let mut intervals = self.intervals.clone();
        match kind {
            BoundaryKind::Start => intervals[index].start = proposed,
            BoundaryKind::End => intervals[index].end = proposed,
        }
        Ok(self.with_intervals(intervals))
    }

    /// Append a new interval after the last one, running to the end of the media.
    pub fn append(&self) -> Result<Self, EditError> {
        let gap = self.config.gap();
        let pad = self.config.pad();
        let new_start = self.last().end.saturating_add(gap);

        if new_start.saturating_add(gap) >= self.duration
            || new_start.saturating_add(pad) >= self.duration
        {
            return Err(EditError::TimelineFull);
        }

        let mut intervals = self.intervals.clone();
        intervals.push(Interval::new(new_start + pad, self.duration));
        Ok(self.with_intervals(intervals))
    }

    /// Remove `intervals[index]`. The last remaining interval cannot be removed.
    pub fn delete(&self, index: usize) -> Result<Self, EditError> {
        if index >= self.intervals.len() {
            return Err(EditError::NoSuchInterval {
                index,
                len: self.intervals.len(),
            });
        }
        if self.intervals.len() == 1 {
            return Err(EditError::LastInterval);
        }

        let mut intervals = self.intervals.clone();
        intervals.remove(index);
        Ok(self.with_intervals(intervals))
    }

    /// A fresh whole-media timeline with the same duration and config.
    pub fn reset(&self) -> Self {
        Self {
            intervals: vec![Interval::new(0, self.duration)],
            duration: self.duration,
            config: self.config,
        }
    }

    /// Index of the interval containing `position` (inclusive bounds).
    pub fn segment_at(&self, position: Time) -> Option<usize> {
        // Linear scan: a timeline holds a handful of intervals
        self.intervals.iter().position(|i| i.contains(position))
    }

    /// Index of the first interval starting strictly after `position`.
    pub fn next_segment_after(&self, position: Time) -> Option<usize> {
        self.intervals.iter().position(|i| i.start > position)
    }

    /// Index of the first interval ending strictly before `position`.
    pub fn first_segment_before(&self, position: Time) -> Option<usize> {
        self.intervals.iter().position(|i| i.end < position)
    }

    /// Interval to jump to when skipping forward from `position`. Wraps to the first.
    pub fn skip_forward_from(&self, position: Time) -> usize {
        match self.segment_at(position) {
            Some(current) => (current + 1) % self.intervals.len(),
            None => self.next_segment_after(position).unwrap_or(0),
        }
    }

    /// Interval to jump to when skipping back from `position`. Wraps to the last.
    pub fn skip_back_from(&self, position: Time) -> usize {
        let last = self.intervals.len() - 1;
        match self.segment_at(position) {
            Some(0) => last,
            Some(current) => current - 1,
            // In a gap: the interval just behind the playhead
            None => self
                .intervals
                .iter()
                .rposition(|i| i.end < position)
                .unwrap_or(last),
        }
    }

    /// Total kept time.
    pub fn kept_duration(&self) -> Time {
        self.intervals.iter().map(Interval::duration).sum()
    }

    /// Owned copy of the intervals, for hand-off to export.
    pub fn snapshot(&self) -> Vec<Interval> {
        self.intervals.clone()
    }

    fn with_intervals(&self, intervals: Vec<Interval>) -> Self {
        Self {
            intervals,
            duration: self.duration,
            config: self.config,
        }
    }
}
