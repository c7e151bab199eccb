//! Trim controller: owns the timeline, the drag state and the deletion mode,
//! and wires them to a media element.
//!
//! Every handler takes `&mut self`, so each one sees the latest timeline and
//! play state. A drag in progress owns seeking; every seek/play/pause issued
//! here checks it first.

use tokio::sync::watch;

use crate::core::config::TrimConfig;
use crate::core::time::{self, Time};
use crate::core::timeline::{EditError, Timeline};
use crate::export::{CropRect, ExportError, ExportRequest, ExportSink};
use crate::interaction::drag::{DragController, DragOutcome, TrackGeometry};
use crate::interaction::grab::{DeletionMode, GrabHandle, Notice};
use crate::interaction::input::{InputBus, Key, PointerEvent};
use crate::media::MediaElement;
use crate::playback::state::PlaybackState;
use crate::playback::sync::{PlaybackSynchronizer, SyncAction};
use crate::visual::scene::TimelineScene;

pub struct TrimController<M: MediaElement> {
    config: TrimConfig,
    media: Option<M>,
    timeline: Option<Timeline>,
    timeline_tx: watch::Sender<Option<Timeline>>,
    drag: DragController,
    deletion: DeletionMode,
    sync: PlaybackSynchronizer,
    geometry: Option<TrackGeometry>,
    muted: bool,
}

impl<M: MediaElement> TrimController<M> {
    pub fn new(config: TrimConfig) -> Self {
        let (timeline_tx, _) = watch::channel(None);
        Self {
            config,
            media: None,
            timeline: None,
            timeline_tx,
            drag: DragController::new(),
            deletion: DeletionMode::default(),
            sync: PlaybackSynchronizer::new(),
            geometry: None,
            muted: false,
        }
    }

    /// Attach a player. If its metadata is already available the timeline is seeded.
    pub fn attach_media(&mut self, media: M) {
        self.drag.cancel();
        self.media = Some(media);
        self.on_metadata_loaded();
    }

    /// Detach the player, ending any drag. The timeline is kept.
    pub fn detach_media(&mut self) -> Option<M> {
        self.drag.cancel();
        self.media.take()
    }

    pub fn media(&self) -> Option<&M> {
        self.media.as_ref()
    }

    pub fn media_mut(&mut self) -> Option<&mut M> {
        self.media.as_mut()
    }

    /// Receiver that observes every published timeline.
    pub fn subscribe(&self) -> watch::Receiver<Option<Timeline>> {
        self.timeline_tx.subscribe()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Where the track currently sits on screen; needed to map pointer x to time.
    pub fn set_track_geometry(&mut self, geometry: TrackGeometry) {
        self.geometry = Some(geometry);
    }

    /// Seed the timeline from the media duration.
    ///
    /// An existing timeline is kept when the duration has not changed. An
    /// unusable duration (zero, negative, NaN) is ignored.
    pub fn on_metadata_loaded(&mut self) {
        let Some(seconds) = self.media.as_ref().and_then(|m| m.duration()) else {
            return;
        };
        if let Some(current) = &self.timeline {
            if seconds.is_finite() && current.duration() == time::from_seconds(seconds) {
                return;
            }
        }
        match Timeline::initialize_seconds(seconds, self.config) {
            Ok(timeline) => {
                tracing::info!(duration = seconds, "timeline seeded");
                self.drag.cancel();
                self.sync.collapse_progress(timeline.first().start);
                self.publish(timeline);
            }
            Err(err) => tracing::debug!(%err, "ignoring media metadata"),
        }
    }

    /// Periodic play-position notification from the player.
    pub fn on_time_update(&mut self) -> Option<SyncAction> {
        let (Some(media), Some(timeline)) = (self.media.as_mut(), self.timeline.as_ref()) else {
            return None;
        };
        Some(self.sync.on_time_update(timeline, media, self.drag.is_dragging()))
    }

    /// Pointer pressed on a boundary handle.
    ///
    /// In deletion mode this deletes the handle's interval; otherwise it starts
    /// a drag that listens on `bus` until the pointer is released.
    pub fn press_handle(&mut self, grab: GrabHandle, bus: &mut InputBus) {
        if self.timeline.is_none() {
            return;
        }
        if self.deletion.is_active() {
            self.delete_interval(grab.index);
            return;
        }
        let Some(media) = self.media.as_ref() else {
            return;
        };
        let resume_playback = !media.is_paused();
        self.drag.begin(grab, resume_playback, bus);
    }

    /// Emit a raw pointer event on `bus` and process whatever the drag received.
    pub fn pointer(&mut self, bus: &mut InputBus, event: PointerEvent) {
        bus.emit(event);
        self.process_pointer_events();
    }

    /// Drain pointer events queued for the running drag.
    pub fn process_pointer_events(&mut self) {
        while let Some(event) = self.drag.poll() {
            self.apply_drag_event(event);
        }
    }

    fn apply_drag_event(&mut self, event: PointerEvent) {
        let (Some(media), Some(timeline)) = (self.media.as_mut(), self.timeline.as_ref()) else {
            self.drag.cancel();
            return;
        };
        let outcome = self.drag.handle(event, timeline, self.geometry);
        if outcome.is_move() {
            media.pause();
        }

        match outcome {
            DragOutcome::Resized { timeline, preview } => {
                media.set_current_time(time::to_seconds(preview));
                self.sync.collapse_progress(preview);
                self.publish(timeline);
            }
            DragOutcome::Rejected(err) => log_rejected("resize", &err),
            DragOutcome::Released { resume_playback } => {
                if resume_playback {
                    media.play();
                }
            }
            DragOutcome::Ignored => {}
        }
    }

    /// Keyboard key released.
    pub fn key_up(&mut self, key: Key) {
        if key == Key::Space {
            self.toggle_play();
        }
    }

    /// Play/pause. Returns whether the player is playing afterwards.
    pub fn toggle_play(&mut self) -> bool {
        let (Some(media), Some(timeline)) = (self.media.as_mut(), self.timeline.as_ref()) else {
            return false;
        };
        self.sync.toggle_play(timeline, media, self.drag.is_dragging())
    }

    /// Append a new interval after the last one. Also leaves deletion mode.
    /// Refused while a drag holds a handle.
    pub fn add_interval(&mut self) {
        if self.drag.is_dragging() {
            tracing::debug!(operation = "append", "edit refused during drag");
            return;
        }
        self.deletion.clear();
        let Some(timeline) = &self.timeline else {
            return;
        };
        match timeline.append() {
            Ok(updated) => self.publish(updated),
            Err(err) => log_rejected("append", &err),
        }
    }

    /// Enter or leave deletion mode. Returns the notice to show.
    pub fn toggle_deletion_mode(&mut self) -> Option<Notice> {
        if self.timeline.is_none() {
            return None;
        }
        self.deletion.toggle()
    }

    /// Delete `intervals[index]` and seek to the start of the first interval.
    /// Deletion mode ends whether or not the delete succeeded.
    /// Refused while a drag holds a handle, since it would shift the held index.
    pub fn delete_interval(&mut self, index: usize) {
        if self.drag.is_dragging() {
            tracing::debug!(operation = "delete", index, "edit refused during drag");
            return;
        }
        self.deletion.clear();
        let Some(timeline) = &self.timeline else {
            return;
        };
        match timeline.delete(index) {
            Ok(updated) => {
                let first = updated.first().start;
                self.publish(updated);
                self.seek(first);
                self.sync.collapse_progress(first);
            }
            Err(err) => log_rejected("delete", &err),
        }
    }

    /// Back to a single whole-media interval, paused at the start and unmuted.
    pub fn reset(&mut self) {
        let (Some(media), Some(timeline)) = (self.media.as_mut(), self.timeline.as_ref()) else {
            return;
        };
        self.drag.cancel();
        self.deletion.clear();
        let fresh = timeline.reset();
        let first = fresh.first().start;

        media.pause();
        media.set_muted(false);
        media.set_current_time(time::to_seconds(first));
        self.muted = false;
        self.sync.collapse_progress(first);
        tracing::info!("timeline reset");
        self.publish(fresh);
    }

    /// Click on the track: pause and seek there, but only inside a kept interval.
    pub fn seek_to_pointer(&mut self, x: f32) {
        if self.drag.is_dragging() {
            return;
        }
        let (Some(timeline), Some(geometry)) = (self.timeline.as_ref(), self.geometry) else {
            return;
        };
        let Some(target) = geometry.time_at(x, timeline.duration()) else {
            return;
        };
        let Some(segment) = timeline.segment_at(target) else {
            tracing::trace!(at = time::to_seconds(target), "click in removed gap ignored");
            return;
        };
        let segment_start = timeline.intervals()[segment].start;

        if let Some(media) = self.media.as_mut() {
            media.pause();
        }
        self.sync.collapse_progress(segment_start);
        self.seek(target);
    }

    /// Pause and jump to the start of the next interval, wrapping to the first.
    pub fn skip_next(&mut self) {
        self.skip(Timeline::skip_forward_from);
    }

    /// Pause and jump to the start of the previous interval, wrapping to the last.
    pub fn skip_previous(&mut self) {
        self.skip(Timeline::skip_back_from);
    }

    fn skip(&mut self, pick: fn(&Timeline, Time) -> usize) {
        if self.drag.is_dragging() {
            return;
        }
        let (Some(media), Some(timeline)) = (self.media.as_mut(), self.timeline.as_ref()) else {
            return;
        };
        media.pause();
        let position = time::from_seconds(media.current_time());
        let target = timeline.intervals()[pick(timeline, position)].start;
        self.sync.collapse_progress(target);
        self.seek(target);
    }

    /// Flip mute on the player. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        let Some(media) = self.media.as_mut() else {
            return self.muted;
        };
        self.muted = !self.muted;
        media.set_muted(self.muted);
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Snapshot of the current timeline for the export backend.
    pub fn export_request(&self, crop: Option<CropRect>) -> Result<ExportRequest, ExportError> {
        let timeline = self.timeline.as_ref().ok_or(ExportError::NoTimeline)?;
        ExportRequest::from_timeline(timeline, crop)
    }

    pub fn submit_export<S: ExportSink + ?Sized>(
        &self,
        sink: &mut S,
        crop: Option<CropRect>,
    ) -> Result<(), ExportError> {
        let request = self.export_request(crop)?;
        sink.submit(request)
    }

    /// Scene for the track widget, `None` until the timeline exists.
    pub fn scene(&self, base_width: f32, zoom: f32) -> Option<TimelineScene> {
        let timeline = self.timeline.as_ref()?;
        let cursor = self
            .media
            .as_ref()
            .map_or(0, |m| time::from_seconds(m.current_time()));
        Some(TimelineScene::build(
            timeline,
            self.sync.progress(),
            cursor,
            self.drag.grab(),
            base_width,
            zoom,
        ))
    }

    pub fn playback_state(&self) -> PlaybackState {
        let (Some(media), Some(_)) = (self.media.as_ref(), self.timeline.as_ref()) else {
            return PlaybackState::Unloaded;
        };
        let position = time::from_seconds(media.current_time());
        match self.drag.grab() {
            Some(grab) => PlaybackState::Scrubbing { grab, position },
            None if media.is_paused() => PlaybackState::Paused { position },
            None => PlaybackState::Playing { position },
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        self.deletion.notice()
    }

    pub fn is_deleting(&self) -> bool {
        self.deletion.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn grab_handle(&self) -> Option<GrabHandle> {
        self.drag.grab()
    }

    fn seek(&mut self, to: Time) {
        if self.drag.is_dragging() {
            return;
        }
        if let Some(media) = self.media.as_mut() {
            media.set_current_time(time::to_seconds(to));
        }
    }

    fn publish(&mut self, timeline: Timeline) {
        self.timeline = Some(timeline.clone());
        self.timeline_tx.send_replace(Some(timeline));
    }
}

fn log_rejected(operation: &'static str, err: &EditError) {
    tracing::debug!(operation, %err, "edit rejected");
}
