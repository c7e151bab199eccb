//! Keeps the player inside the kept intervals.
//!
//! On every "time update" tick the synchronizer looks at where the player is
//! and decides whether to follow along, skip a removed gap, or stop at the
//! end of the last kept interval. It never acts while a boundary drag is in
//! progress: the drag owns seeking for its whole lifetime.

use crate::core::time::{self, Time};
use crate::core::timeline::Timeline;
use crate::media::MediaElement;

/// What the synchronizer did (or would do) for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// A drag is in progress; nothing is touched.
    Hold,
    /// The player is inside `segment`; keep playing.
    Track { segment: usize },
    /// The player is in a removed gap; jump to the next kept interval.
    SkipTo { segment: usize, to: Time },
    /// The player ran past all kept content; stop and go back to the first interval.
    Rewind { to: Time },
    /// No interval could be located at all; fall back to the first interval's start.
    Recover { to: Time },
}

/// Pure tick policy, evaluated in order:
/// drag gate, containing interval, future interval, past interval, fallback.
pub fn decide(timeline: &Timeline, position: Time, dragging: bool) -> SyncAction {
    if dragging {
        return SyncAction::Hold;
    }
    if let Some(segment) = timeline.segment_at(position) {
        return SyncAction::Track { segment };
    }
    if let Some(segment) = timeline.next_segment_after(position) {
        return SyncAction::SkipTo {
            segment,
            to: timeline.intervals()[segment].start,
        };
    }
    if let Some(segment) = timeline.first_segment_before(position) {
        return SyncAction::Rewind {
            to: timeline.intervals()[segment].start,
        };
    }
    SyncAction::Recover {
        to: timeline.first().start,
    }
}

/// The blue bar growing under the track while playing.
///
/// `origin` is where the bar starts; `position` is where it currently ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressIndicator {
    pub origin: Time,
    pub position: Time,
}

impl ProgressIndicator {
    /// Collapse the bar to zero width at `at`.
    pub fn collapsed(at: Time) -> Self {
        Self {
            origin: at,
            position: at,
        }
    }

    pub fn left_percent(&self, duration: Time) -> f64 {
        time::percent_of(self.origin, duration)
    }

    pub fn width_percent(&self, duration: Time) -> f64 {
        time::percent_of((self.position - self.origin).max(0), duration)
    }
}

/// Applies [`decide`] to a media element and tracks the progress bar.
#[derive(Debug, Default)]
pub struct PlaybackSynchronizer {
    progress: ProgressIndicator,
}

impl PlaybackSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> ProgressIndicator {
        self.progress
    }

    /// Collapse the progress bar at `at`, e.g. while previewing a drag.
    pub fn collapse_progress(&mut self, at: Time) {
        self.progress = ProgressIndicator::collapsed(at);
    }

    /// Handle one "time update" notification.
    pub fn on_time_update<M: MediaElement + ?Sized>(
        &mut self,
        timeline: &Timeline,
        media: &mut M,
        dragging: bool,
    ) -> SyncAction {
        let position = time::from_seconds(media.current_time());
        let action = decide(timeline, position, dragging);

        match action {
            SyncAction::Hold => {}
            SyncAction::Track { .. } => {
                self.progress = ProgressIndicator {
                    origin: timeline.first().start,
                    position,
                };
            }
            SyncAction::SkipTo { segment, to } => {
                tracing::trace!(segment, to = time::to_seconds(to), "skipping removed gap");
                media.set_current_time(time::to_seconds(to));
            }
            SyncAction::Rewind { to } => {
                tracing::debug!(to = time::to_seconds(to), "reached end of kept content");
                media.pause();
                media.set_current_time(time::to_seconds(to));
                self.progress = ProgressIndicator::collapsed(to);
            }
            SyncAction::Recover { to } => {
                tracing::warn!(
                    position = time::to_seconds(position),
                    "playhead outside every interval, recovering"
                );
                media.set_current_time(time::to_seconds(to));
                self.progress = ProgressIndicator::collapsed(to);
            }
        }
        action
    }

    /// Play/pause toggle.
    ///
    /// Pressing play at or past the end of the last interval first rewinds to
    /// the first interval's start. Returns whether the player is now playing.
    pub fn toggle_play<M: MediaElement + ?Sized>(
        &mut self,
        timeline: &Timeline,
        media: &mut M,
        dragging: bool,
    ) -> bool {
        if dragging {
            return !media.is_paused();
        }
        if !media.is_paused() {
            media.pause();
            return false;
        }

        let position = time::from_seconds(media.current_time());
        if position >= timeline.last().end {
            let first = timeline.first().start;
            media.set_current_time(time::to_seconds(first));
            self.progress = ProgressIndicator::collapsed(first);
        }
        media.play();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TrimConfig;
    use crate::core::interval::Interval;
    use crate::core::time::from_seconds;
    use crate::media::SimulatedMedia;

    fn timeline(duration: f64, ranges: &[(f64, f64)]) -> Timeline {
        let intervals = ranges
            .iter()
            .map(|&(s, e)| Interval::from_seconds(s, e))
            .collect();
        Timeline::from_intervals(from_seconds(duration), intervals, TrimConfig::default()).unwrap()
    }

    #[test]
    fn test_decide_order() {
        let tl = timeline(10.0, &[(1.0, 4.0), (6.0, 8.0)]);

        assert_eq!(decide(&tl, from_seconds(5.0), true), SyncAction::Hold);
        assert_eq!(decide(&tl, from_seconds(2.0), false), SyncAction::Track { segment: 0 });
        assert_eq!(
            decide(&tl, from_seconds(0.5), false),
            SyncAction::SkipTo { segment: 0, to: from_seconds(1.0) }
        );
        assert_eq!(
            decide(&tl, from_seconds(5.0), false),
            SyncAction::SkipTo { segment: 1, to: from_seconds(6.0) }
        );
        assert_eq!(
            decide(&tl, from_seconds(9.0), false),
            SyncAction::Rewind { to: from_seconds(1.0) }
        );
    }

    #[test]
    fn test_gap_skip() {
        let tl = timeline(10.0, &[(0.0, 4.0), (6.0, 10.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(5.0);
        media.play();

        let mut sync = PlaybackSynchronizer::new();
        let action = sync.on_time_update(&tl, &mut media, false);

        assert_eq!(action, SyncAction::SkipTo { segment: 1, to: from_seconds(6.0) });
        assert_eq!(media.current_time(), 6.0);
        assert!(!media.is_paused());
    }

    #[test]
    fn test_stops_after_last_interval() {
        let tl = timeline(10.0, &[(2.0, 8.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(8.3);
        media.play();

        let mut sync = PlaybackSynchronizer::new();
        sync.on_time_update(&tl, &mut media, false);

        assert!(media.is_paused());
        assert_eq!(media.current_time(), 2.0);
        assert_eq!(sync.progress(), ProgressIndicator::collapsed(from_seconds(2.0)));
    }

    #[test]
    fn test_drag_gate_leaves_media_alone() {
        let tl = timeline(10.0, &[(0.0, 4.0), (6.0, 10.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(5.0);

        let mut sync = PlaybackSynchronizer::new();
        assert_eq!(sync.on_time_update(&tl, &mut media, true), SyncAction::Hold);
        assert_eq!(media.seeks(), &[5.0]);
    }

    #[test]
    fn test_tracking_updates_progress() {
        let tl = timeline(10.0, &[(2.0, 8.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(5.0);

        let mut sync = PlaybackSynchronizer::new();
        sync.on_time_update(&tl, &mut media, false);

        let progress = sync.progress();
        assert_eq!(progress.left_percent(tl.duration()), 20.0);
        assert_eq!(progress.width_percent(tl.duration()), 30.0);
    }

    #[test]
    fn test_play_at_end_restarts_at_first_interval() {
        let tl = timeline(10.0, &[(2.0, 8.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(8.0);

        let mut sync = PlaybackSynchronizer::new();
        assert!(sync.toggle_play(&tl, &mut media, false));

        assert_eq!(media.current_time(), 2.0);
        assert!(!media.is_paused());
    }

    #[test]
    fn test_toggle_pauses_when_playing() {
        let tl = timeline(10.0, &[(2.0, 8.0)]);
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(3.0);
        media.play();

        let mut sync = PlaybackSynchronizer::new();
        assert!(!sync.toggle_play(&tl, &mut media, false));
        assert!(media.is_paused());
        assert_eq!(media.current_time(), 3.0);
    }

    #[test]
    fn test_toggle_ignored_while_dragging() {
        let tl = timeline(10.0, &[(2.0, 8.0)]);
        let mut media = SimulatedMedia::loaded(10.0);

        let mut sync = PlaybackSynchronizer::new();
        assert!(!sync.toggle_play(&tl, &mut media, true));
        assert!(media.is_paused());
    }
}
