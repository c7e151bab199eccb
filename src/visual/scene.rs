//! Everything the track widget needs to draw one frame.
//!
//! A scene is rebuilt from the current timeline whenever it is needed; the
//! renderer only reads it. Zoom scales the pixel width of the track, never the
//! percentages.

use crate::core::time::{self, Time};
use crate::core::timeline::{BoundaryKind, Timeline};
use crate::interaction::grab::GrabHandle;
use crate::playback::sync::ProgressIndicator;
use crate::visual::bands::{self, Band};

/// A draggable boundary marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMark {
    pub grab: GrabHandle,
    pub percent: f64,
    /// Currently held by a drag
    pub held: bool,
}

/// Progress bar geometry, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub left_percent: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineScene {
    pub bands: Vec<Band>,
    pub handles: Vec<HandleMark>,
    pub progress: ProgressBar,
    /// Playhead position in percent
    pub cursor_percent: f64,
    /// Width of the track in pixels after zoom
    pub pixel_width: f32,
}

impl TimelineScene {
    /// Build the scene for `timeline`.
    ///
    /// `base_width` is the unzoomed track width in pixels; a non-positive or
    /// non-finite `zoom` is treated as 1.
    pub fn build(
        timeline: &Timeline,
        progress: ProgressIndicator,
        cursor: Time,
        held: Option<GrabHandle>,
        base_width: f32,
        zoom: f32,
    ) -> Self {
        let duration = timeline.duration();
        let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };

        let handles = timeline
            .intervals()
            .iter()
            .enumerate()
            .flat_map(|(index, interval)| {
                [
                    (GrabHandle::start(index), interval.start),
                    (GrabHandle::end(index), interval.end),
                ]
            })
            .map(|(grab, at)| HandleMark {
                grab,
                percent: time::percent_of(at, duration),
                held: held == Some(grab),
            })
            .collect();

        Self {
            bands: bands::project(timeline.intervals(), duration),
            handles,
            progress: ProgressBar {
                left_percent: progress.left_percent(duration),
                width_percent: progress.width_percent(duration),
            },
            cursor_percent: time::percent_of(cursor.clamp(0, duration), duration),
            pixel_width: base_width.max(0.0) * zoom,
        }
    }

    /// Pixel offset of a percentage along the zoomed track.
    pub fn to_pixels(&self, percent: f64) -> f32 {
        (percent / 100.0) as f32 * self.pixel_width
    }

    /// Handle closest to `x` (track-local pixels) within `tolerance` pixels.
    ///
    /// When a start and an end handle are equally close, the one the pointer
    /// is on the inner side of wins: right of an end handle picks the next start.
    pub fn hit_test(&self, x: f32, tolerance: f32) -> Option<GrabHandle> {
        let mut best: Option<(f32, GrabHandle)> = None;
        for handle in &self.handles {
            let distance = (self.to_pixels(handle.percent) - x).abs();
            if distance > tolerance {
                continue;
            }
            let better = match best {
                None => true,
                Some((d, _)) if distance < d => true,
                Some((d, _)) if distance == d => match handle.grab.kind {
                    BoundaryKind::Start => x >= self.to_pixels(handle.percent),
                    BoundaryKind::End => x <= self.to_pixels(handle.percent),
                },
                _ => false,
            };
            if better {
                best = Some((distance, handle.grab));
            }
        }
        best.map(|(_, grab)| grab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TrimConfig;
    use crate::core::interval::Interval;
    use crate::core::time::from_seconds;

    fn timeline() -> Timeline {
        Timeline::from_intervals(
            from_seconds(10.0),
            vec![Interval::from_seconds(1.0, 4.0), Interval::from_seconds(6.0, 9.0)],
            TrimConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_handles_follow_intervals() {
        let scene = TimelineScene::build(
            &timeline(),
            ProgressIndicator::default(),
            0,
            Some(GrabHandle::end(1)),
            1000.0,
            1.0,
        );
        let percents: Vec<_> = scene.handles.iter().map(|h| h.percent).collect();
        assert_eq!(percents, vec![10.0, 40.0, 60.0, 90.0]);
        let held: Vec<_> = scene.handles.iter().filter(|h| h.held).map(|h| h.grab).collect();
        assert_eq!(held, vec![GrabHandle::end(1)]);
    }

    #[test]
    fn test_zoom_scales_pixels_not_percentages() {
        let tl = timeline();
        let normal = TimelineScene::build(&tl, ProgressIndicator::default(), 0, None, 500.0, 1.0);
        let zoomed = TimelineScene::build(&tl, ProgressIndicator::default(), 0, None, 500.0, 2.0);

        assert_eq!(normal.bands, zoomed.bands);
        assert_eq!(zoomed.pixel_width, 1000.0);
        assert_eq!(zoomed.to_pixels(50.0), 500.0);

        let invalid = TimelineScene::build(&tl, ProgressIndicator::default(), 0, None, 500.0, 0.0);
        assert_eq!(invalid.pixel_width, 500.0);
    }

    #[test]
    fn test_hit_test() {
        let scene = TimelineScene::build(&timeline(), ProgressIndicator::default(), 0, None, 1000.0, 1.0);

        assert_eq!(scene.hit_test(102.0, 6.0), Some(GrabHandle::start(0)));
        assert_eq!(scene.hit_test(397.0, 6.0), Some(GrabHandle::end(0)));
        assert_eq!(scene.hit_test(250.0, 6.0), None);
    }

    #[test]
    fn test_progress_and_cursor() {
        let progress = ProgressIndicator {
            origin: from_seconds(1.0),
            position: from_seconds(3.0),
        };
        let scene = TimelineScene::build(&timeline(), progress, from_seconds(3.0), None, 1000.0, 1.0);
        assert_eq!(scene.progress.left_percent, 10.0);
        assert_eq!(scene.progress.width_percent, 20.0);
        assert_eq!(scene.cursor_percent, 30.0);
    }
}
