//! Preview window for the trim timeline.
//!
//! Drives a [`SimulatedMedia`] from the frame clock so the controller can be
//! exercised without a real player.

use egui::{CentralPanel, Context, Key as EguiKey, Modifiers, TopBottomPanel};
use eframe::{App, CreationContext};

use crate::controller::TrimController;
use crate::core::config::TrimConfig;
use crate::core::time;
use crate::export::{CropRect, LoggingSink};
use crate::interaction::input::{InputBus, Key};
use crate::media::SimulatedMedia;
use crate::playback::state::PlaybackState;
use crate::ui::timeline_view::{TimelineView, MAX_ZOOM, MIN_ZOOM};

/// Length of the simulated clip, in seconds.
pub const DEMO_DURATION: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CropInput {
    enabled: bool,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Default for CropInput {
    fn default() -> Self {
        Self {
            enabled: false,
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

pub struct EditorApp {
    controller: TrimController<SimulatedMedia>,
    bus: InputBus,
    view: TimelineView,
    sink: LoggingSink,
    crop: CropInput,
    status: Option<String>,
}

impl EditorApp {
    pub fn new(_cc: &CreationContext<'_>, config: TrimConfig) -> Self {
        let mut controller = TrimController::new(config);
        // Metadata arrives on the first frame, like a real player
        controller.attach_media(SimulatedMedia::new(DEMO_DURATION));
        Self {
            controller,
            bus: InputBus::new(),
            view: TimelineView::new(),
            sink: LoggingSink::new(),
            crop: CropInput::default(),
            status: None,
        }
    }

    fn tick(&mut self, dt: f64) {
        let Some(media) = self.controller.media_mut() else {
            return;
        };
        if media.load_metadata() {
            self.controller.on_metadata_loaded();
        }
        let update_due = self.controller.media_mut().is_some_and(|m| m.advance(dt));
        if update_due {
            self.controller.on_time_update();
        }
    }

    fn export(&mut self) {
        let crop = if self.crop.enabled {
            match CropRect::new(self.crop.x, self.crop.y, self.crop.width, self.crop.height) {
                Ok(rect) => Some(rect),
                Err(err) => {
                    self.status = Some(err.to_string());
                    return;
                }
            }
        } else {
            None
        };
        self.status = Some(match self.controller.submit_export(&mut self.sink, crop) {
            Ok(()) => match self.sink.last() {
                Some(request) => format!(
                    "Export queued: {} segment(s), {}",
                    request.timings.len(),
                    time::format_time(time::from_seconds(request.kept_seconds()))
                ),
                None => "Export queued".to_string(),
            },
            Err(err) => {
                tracing::warn!(%err, "export failed");
                err.to_string()
            }
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reset").clicked() {
                self.controller.reset();
                self.status = None;
            }
            let mute_label = if self.controller.is_muted() { "Unmute" } else { "Mute" };
            if ui.button(mute_label).clicked() {
                self.controller.toggle_mute();
            }
            ui.separator();
            if ui.button("⏮").on_hover_text("Previous segment").clicked() {
                self.controller.skip_previous();
            }
            let playing = self.controller.playback_state().is_playing();
            if ui.button(if playing { "⏸" } else { "▶" }).clicked() {
                self.controller.toggle_play();
            }
            if ui.button("⏭").on_hover_text("Next segment").clicked() {
                self.controller.skip_next();
            }
            ui.separator();
            if ui.button("Add segment").clicked() {
                self.controller.add_interval();
            }
            let delete_label = if self.controller.is_deleting() {
                "Cancel delete"
            } else {
                "Delete segment"
            };
            if ui.button(delete_label).clicked() {
                self.controller.toggle_deletion_mode();
            }
            ui.separator();
            ui.add(egui::Slider::new(&mut self.view.zoom, MIN_ZOOM..=MAX_ZOOM).text("Zoom"));
            ui.separator();
            if ui.button("Export").clicked() {
                self.export();
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.crop.enabled, "Crop (%)");
            ui.add_enabled_ui(self.crop.enabled, |ui| {
                for (label, value) in [
                    ("x", &mut self.crop.x),
                    ("y", &mut self.crop.y),
                    ("w", &mut self.crop.width),
                    ("h", &mut self.crop.height),
                ] {
                    ui.label(label);
                    ui.add(egui::DragValue::new(value).clamp_range(0.0..=100.0).speed(0.5));
                }
            });
        });
    }

    fn status_line(&self, ui: &mut egui::Ui) {
        let duration = self.controller.timeline().map_or(0, |t| t.duration());
        let kept = self.controller.timeline().map_or(0, |t| t.kept_duration());
        let state = self.controller.playback_state();
        let label = match state {
            PlaybackState::Unloaded => "Loading...".to_string(),
            PlaybackState::Paused { position }
            | PlaybackState::Playing { position }
            | PlaybackState::Scrubbing { position, .. } => format!(
                "{} / {}  (kept {})",
                time::format_time(position),
                time::format_time(duration),
                time::format_time(kept)
            ),
        };
        ui.horizontal(|ui| {
            ui.monospace(label);
            if let Some(notice) = self.controller.notice() {
                ui.colored_label(egui::Color32::from_rgb(220, 60, 60), notice.message());
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }
}

impl App for EditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // Space acts on release; the press is consumed so a focused button is not clicked too
        let (dt, space_released) = ctx.input_mut(|i| {
            i.consume_key(Modifiers::NONE, EguiKey::Space);
            (i.stable_dt as f64, i.key_released(EguiKey::Space))
        });
        self.tick(dt);
        if space_released {
            self.controller.key_up(Key::Space);
        }

        TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));

        TopBottomPanel::bottom("timeline")
            .resizable(false)
            .show(ctx, |ui| {
                self.status_line(ui);
                self.view.show(ui, &mut self.controller, &mut self.bus);
            });

        CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                let muted = self.controller.media().is_some_and(|m| m.is_muted());
                ui.heading(if muted { "Preview (muted)" } else { "Preview" });
            });
        });

        let state = self.controller.playback_state();
        if state.is_playing() || state.is_scrubbing() || state == PlaybackState::Unloaded {
            ctx.request_repaint();
        }
    }
}
