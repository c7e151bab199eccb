//! Projection of a timeline onto percentage bands for drawing.

use crate::core::interval::Interval;
use crate::core::time::{self, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    /// Removed media
    Inactive,
    /// Kept interval
    Active,
}

/// One horizontal stretch of the track, in percent of the media duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub kind: BandKind,
    pub start_percent: f64,
    pub end_percent: f64,
    /// Index of the interval for active bands
    pub segment: Option<usize>,
}

impl Band {
    fn inactive(start_percent: f64, end_percent: f64) -> Self {
        Self {
            kind: BandKind::Inactive,
            start_percent,
            end_percent,
            segment: None,
        }
    }
}

/// Percentages are kept to 1/1000 %, well below one pixel at any zoom.
fn rounded_percent(nanos: Time, duration: Time) -> f64 {
    (time::percent_of(nanos, duration) * 1000.0).round() / 1000.0
}

/// Alternating inactive/active bands covering 0%..100%.
///
/// One active band per interval; inactive bands before the first interval,
/// between intervals and after the last. A gap that rounds to zero width
/// gets no band, so an interval starting at 0% or ending at 100% touches the
/// track edge directly. Empty input or duration yields no bands.
pub fn project(intervals: &[Interval], duration: Time) -> Vec<Band> {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return Vec::new();
    };
    if duration <= 0 {
        return Vec::new();
    }

    let pct = |t: Time| rounded_percent(t, duration);
    let mut bands = Vec::with_capacity(intervals.len() * 2 + 1);

    push_gap(&mut bands, 0.0, pct(first.start));
    for (index, interval) in intervals.iter().enumerate() {
        if index > 0 {
            push_gap(&mut bands, pct(intervals[index - 1].end), pct(interval.start));
        }
        bands.push(Band {
            kind: BandKind::Active,
            start_percent: pct(interval.start),
            end_percent: pct(interval.end),
            segment: Some(index),
        });
    }
    push_gap(&mut bands, pct(last.end), 100.0);
    bands
}

fn push_gap(bands: &mut Vec<Band>, start_percent: f64, end_percent: f64) {
    if end_percent > start_percent {
        bands.push(Band::inactive(start_percent, end_percent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::from_seconds;

    fn intervals(ranges: &[(f64, f64)]) -> Vec<Interval> {
        ranges
            .iter()
            .map(|&(s, e)| Interval::from_seconds(s, e))
            .collect()
    }

    #[test]
    fn test_single_interval() {
        let bands = project(&intervals(&[(2.0, 8.0)]), from_seconds(10.0));
        let kinds: Vec<_> = bands.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BandKind::Inactive, BandKind::Active, BandKind::Inactive]);
        assert_eq!(bands[1].start_percent, 20.0);
        assert_eq!(bands[1].end_percent, 80.0);
        assert_eq!(bands[2].end_percent, 100.0);
    }

    #[test]
    fn test_bands_cover_track_and_alternate() {
        let bands = project(&intervals(&[(0.0, 3.0), (4.0, 7.0), (8.0, 9.5)]), from_seconds(10.0));
        // starts at 0%, so no leading gap
        assert_eq!(bands.len(), 6);
        assert_eq!(bands[0].kind, BandKind::Active);
        assert_eq!(bands[0].start_percent, 0.0);
        assert_eq!(bands[bands.len() - 1].end_percent, 100.0);
        for pair in bands.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
            assert_eq!(pair[0].end_percent, pair[1].start_percent);
        }
        let segments: Vec<_> = bands.iter().filter_map(|b| b.segment).collect();
        assert_eq!(segments, vec![0, 1, 2]);
    }

    #[test]
    fn test_no_zero_width_gaps() {
        let bands = project(&intervals(&[(0.0, 10.0)]), from_seconds(10.0));
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].kind, BandKind::Active);

        // touching intervals leave no gap between them
        let touching = project(&intervals(&[(0.0, 5.0), (5.0, 10.0)]), from_seconds(10.0));
        assert!(touching.iter().all(|b| b.kind == BandKind::Active));
        assert!(touching.iter().all(|b| b.end_percent > b.start_percent));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let source = intervals(&[(0.5, 3.3), (5.1, 9.7)]);
        let duration = from_seconds(10.0);
        assert_eq!(project(&source, duration), project(&source, duration));
    }

    #[test]
    fn test_percentages_are_rounded() {
        let bands = project(&intervals(&[(0.0, 1.0)]), from_seconds(3.0));
        assert_eq!(bands[1].end_percent, 33.333);
    }

    #[test]
    fn test_empty_input() {
        assert!(project(&[], from_seconds(10.0)).is_empty());
        assert!(project(&intervals(&[(0.0, 1.0)]), 0).is_empty());
    }
}
