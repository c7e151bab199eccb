//! Boundary drag state machine.
//!
//! `Idle` → (handle pressed) → `Dragging` → (pointer released anywhere) → `Idle`.
//!
//! While dragging, the session owns a [`PointerSubscription`] so that moves and
//! the final release are seen even when the pointer leaves the narrow handle.
//! Ending the session drops the subscription, which detaches the listener.

use crate::core::time::{self, Time};
use crate::core::timeline::{EditError, Timeline};
use crate::interaction::grab::GrabHandle;
use crate::interaction::input::{InputBus, PointerEvent, PointerSubscription};

/// Horizontal placement of the seekable track in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    pub left: f32,
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    /// Fraction of the track under `x`. Not clamped: a drag may leave the track.
    pub fn ratio_at(&self, x: f32) -> Option<f64> {
        if self.width <= 0.0 || !self.width.is_finite() {
            return None;
        }
        Some((x as f64 - self.left as f64) / self.width as f64)
    }

    /// Media time under `x`, `ratio * duration`.
    pub fn time_at(&self, x: f32, duration: Time) -> Option<Time> {
        self.ratio_at(x)
            .map(|ratio| time::from_seconds(ratio * time::to_seconds(duration)))
    }
}

/// An in-progress boundary drag.
#[derive(Debug)]
pub struct DragSession {
    grab: GrabHandle,
    resume_playback: bool,
    subscription: PointerSubscription,
}

#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of feeding one pointer event to the drag state machine
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Not dragging, or the event carries nothing for the drag.
    Ignored,
    /// The boundary moved. `preview` is where the player should seek:
    /// the new start for start drags, the interval's start for end drags.
    Resized { timeline: Timeline, preview: Time },
    /// The pointer moved but the proposal broke a spacing rule; nothing changed.
    Rejected(EditError),
    /// The drag ended.
    Released { resume_playback: bool },
}

impl DragOutcome {
    /// Move events pause playback whether or not the boundary moved.
    pub fn is_move(&self) -> bool {
        matches!(self, DragOutcome::Resized { .. } | DragOutcome::Rejected(_))
    }
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn grab(&self) -> Option<GrabHandle> {
        match &self.state {
            DragState::Dragging(session) => Some(session.grab),
            DragState::Idle => None,
        }
    }

    /// Start dragging `grab`, attaching a pointer listener to `bus`.
    /// Ignored when a drag is already running.
    pub fn begin(&mut self, grab: GrabHandle, resume_playback: bool, bus: &mut InputBus) -> bool {
        if self.is_dragging() {
            return false;
        }
        tracing::debug!(index = grab.index, kind = grab.kind.as_str(), "drag started");
        self.state = DragState::Dragging(DragSession {
            grab,
            resume_playback,
            subscription: bus.subscribe_pointer(),
        });
        true
    }

    /// Next queued pointer event for the running drag.
    pub fn poll(&self) -> Option<PointerEvent> {
        match &self.state {
            DragState::Dragging(session) => session.subscription.try_next(),
            DragState::Idle => None,
        }
    }

    /// Abandon the drag without processing further events.
    /// Returns whether playback should resume.
    pub fn cancel(&mut self) -> Option<bool> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                tracing::debug!(index = session.grab.index, "drag cancelled");
                Some(session.resume_playback)
            }
            DragState::Idle => None,
        }
    }

    /// Apply one pointer event against `timeline`.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        timeline: &Timeline,
        geometry: Option<TrackGeometry>,
    ) -> DragOutcome {
        let grab = match &self.state {
            DragState::Dragging(session) => session.grab,
            DragState::Idle => return DragOutcome::Ignored,
        };

        match event {
            PointerEvent::Up { .. } => {
                let resume_playback = self.cancel().unwrap_or(false);
                tracing::debug!(index = grab.index, "drag released");
                DragOutcome::Released { resume_playback }
            }
            PointerEvent::Move { x, .. } => {
                let Some(proposed) = geometry.and_then(|g| g.time_at(x, timeline.duration())) else {
                    return DragOutcome::Ignored;
                };
                match timeline.resize_boundary(grab.index, grab.kind, proposed) {
                    Ok(updated) => {
                        // End drags preview the start too, so playback never runs past the trim point
                        let preview = updated.intervals()[grab.index].start;
                        DragOutcome::Resized {
                            timeline: updated,
                            preview,
                        }
                    }
                    Err(err) => DragOutcome::Rejected(err),
                }
            }
            PointerEvent::Down { .. } => DragOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TrimConfig;
    use crate::core::interval::Interval;
    use crate::core::time::from_seconds;

    fn two_segments() -> Timeline {
        Timeline::from_intervals(
            from_seconds(10.0),
            vec![Interval::from_seconds(0.0, 4.0), Interval::from_seconds(6.0, 10.0)],
            TrimConfig::default(),
        )
        .unwrap()
    }

    // 100px track starting at x=0: 10px per second
    fn geometry() -> Option<TrackGeometry> {
        Some(TrackGeometry::new(0.0, 100.0))
    }

    #[test]
    fn test_ratio_at() {
        let g = TrackGeometry::new(50.0, 200.0);
        assert_eq!(g.ratio_at(150.0), Some(0.5));
        assert_eq!(g.ratio_at(0.0), Some(-0.25));
        assert_eq!(TrackGeometry::new(0.0, 0.0).ratio_at(10.0), None);
    }

    #[test]
    fn test_idle_ignores_events() {
        let mut drag = DragController::new();
        let outcome = drag.handle(PointerEvent::Move { x: 10.0, y: 0.0 }, &two_segments(), geometry());
        assert_eq!(outcome, DragOutcome::Ignored);
    }

    #[test]
    fn test_start_drag_previews_new_start() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        drag.begin(GrabHandle::start(1), false, &mut bus);

        let outcome = drag.handle(PointerEvent::Move { x: 50.0, y: 0.0 }, &two_segments(), geometry());
        match outcome {
            DragOutcome::Resized { timeline, preview } => {
                assert_eq!(timeline.intervals()[1].start, from_seconds(5.0));
                assert_eq!(preview, from_seconds(5.0));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_end_drag_previews_interval_start() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        drag.begin(GrabHandle::end(1), false, &mut bus);

        let outcome = drag.handle(PointerEvent::Move { x: 80.0, y: 0.0 }, &two_segments(), geometry());
        match outcome {
            DragOutcome::Resized { timeline, preview } => {
                assert_eq!(timeline.intervals()[1].end, from_seconds(8.0));
                assert_eq!(preview, from_seconds(6.0));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_invalid_move_is_rejected() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        drag.begin(GrabHandle::end(0), false, &mut bus);

        // 5.9s would sit inside the gap tolerance of the next interval
        let outcome = drag.handle(PointerEvent::Move { x: 59.0, y: 0.0 }, &two_segments(), geometry());
        assert!(matches!(outcome, DragOutcome::Rejected(EditError::OutOfRange { .. })));
        assert!(outcome.is_move());
        assert!(drag.is_dragging());
    }

    #[test]
    fn test_release_ends_session_and_detaches() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        drag.begin(GrabHandle::start(0), true, &mut bus);
        assert_eq!(bus.listener_count(), 1);

        let outcome = drag.handle(PointerEvent::Up { x: 500.0, y: 90.0 }, &two_segments(), geometry());
        assert_eq!(outcome, DragOutcome::Released { resume_playback: true });
        assert!(!drag.is_dragging());
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_begin_twice_keeps_first_grab() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        assert!(drag.begin(GrabHandle::start(0), false, &mut bus));
        assert!(!drag.begin(GrabHandle::end(1), false, &mut bus));
        assert_eq!(drag.grab(), Some(GrabHandle::start(0)));
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_poll_reads_bus_events() {
        let mut bus = InputBus::new();
        let mut drag = DragController::new();
        assert_eq!(drag.poll(), None);

        drag.begin(GrabHandle::start(0), false, &mut bus);
        bus.emit(PointerEvent::Move { x: 3.0, y: 0.0 });
        assert_eq!(drag.poll(), Some(PointerEvent::Move { x: 3.0, y: 0.0 }));
    }
}
