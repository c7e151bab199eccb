//! Trim track widget.
//!
//! Paints a [`TimelineScene`] and turns egui pointer input into controller
//! calls. Once a handle is pressed the drag follows the global pointer, so
//! moves and the release are seen anywhere in the window.

use egui::{Color32, Pos2, Rect, ScrollArea, Sense, Stroke, Ui};

use crate::controller::TrimController;
use crate::interaction::drag::TrackGeometry;
use crate::interaction::input::{InputBus, PointerEvent};
use crate::media::MediaElement;
use crate::visual::bands::BandKind;
use crate::visual::scene::TimelineScene;

const TRACK_HEIGHT: f32 = 56.0;
const PROGRESS_HEIGHT: f32 = 4.0;
const HANDLE_WIDTH: f32 = 6.0;
/// Pointer slack around a handle, in pixels
const HANDLE_TOLERANCE: f32 = 6.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 8.0;

const INACTIVE: Color32 = Color32::from_rgb(240, 240, 240);
const ACTIVE: Color32 = Color32::from_rgb(204, 204, 204);
const PROGRESS: Color32 = Color32::from_rgb(59, 130, 246);
const CURSOR: Color32 = Color32::from_rgb(30, 30, 30);
const HANDLE: Color32 = Color32::from_rgb(90, 90, 90);
const HANDLE_HELD: Color32 = Color32::from_rgb(59, 130, 246);
const HANDLE_DELETE: Color32 = Color32::from_rgb(220, 60, 60);

pub struct TimelineView {
    pub zoom: f32,
}

impl TimelineView {
    pub fn new() -> Self {
        Self { zoom: MIN_ZOOM }
    }

    pub fn show<M: MediaElement>(
        &mut self,
        ui: &mut Ui,
        controller: &mut TrimController<M>,
        bus: &mut InputBus,
    ) {
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let base_width = ui.available_width();

        ScrollArea::horizontal().drag_to_scroll(false).show(ui, |ui| {
            let Some(scene) = controller.scene(base_width, self.zoom) else {
                ui.label("Waiting for media metadata...");
                return;
            };

            let (rect, _response) = ui.allocate_exact_size(
                egui::vec2(scene.pixel_width, TRACK_HEIGHT + PROGRESS_HEIGHT),
                Sense::click(),
            );
            controller.set_track_geometry(TrackGeometry::new(rect.left(), rect.width()));
            paint(ui, rect, &scene, controller.is_deleting());

            handle_pointer(ui, rect, &scene, controller, bus);
        });
    }
}

impl Default for TimelineView {
    fn default() -> Self {
        Self::new()
    }
}

fn handle_pointer<M: MediaElement>(
    ui: &Ui,
    rect: Rect,
    scene: &TimelineScene,
    controller: &mut TrimController<M>,
    bus: &mut InputBus,
) {
    let (pressed, released, moving, press_pos, latest) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.is_moving(),
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
        )
    });

    if pressed {
        if let Some(pos) = press_pos.filter(|p| rect.contains(*p)) {
            match scene.hit_test(pos.x - rect.left(), HANDLE_TOLERANCE) {
                Some(grab) => controller.press_handle(grab, bus),
                None => controller.seek_to_pointer(pos.x),
            }
        }
    }

    // Raw window events go to the bus whether or not anything listens
    if let Some(pos) = latest {
        if moving {
            controller.pointer(bus, PointerEvent::Move { x: pos.x, y: pos.y });
        }
        if released {
            controller.pointer(bus, PointerEvent::Up { x: pos.x, y: pos.y });
        }
    }
}

fn paint(ui: &Ui, rect: Rect, scene: &TimelineScene, deleting: bool) {
    let painter = ui.painter_at(rect);
    let track = Rect::from_min_size(rect.min, egui::vec2(rect.width(), TRACK_HEIGHT));
    let x_at = |percent: f64| rect.left() + scene.to_pixels(percent);

    for band in &scene.bands {
        let color = match band.kind {
            BandKind::Inactive => INACTIVE,
            BandKind::Active => ACTIVE,
        };
        let band_rect = Rect::from_x_y_ranges(
            x_at(band.start_percent)..=x_at(band.end_percent),
            track.y_range(),
        );
        painter.rect_filled(band_rect, 0.0, color);
    }

    let bar_left = x_at(scene.progress.left_percent);
    let bar_right = x_at(scene.progress.left_percent + scene.progress.width_percent);
    painter.rect_filled(
        Rect::from_min_max(
            Pos2::new(bar_left, track.bottom()),
            Pos2::new(bar_right, rect.bottom()),
        ),
        0.0,
        PROGRESS,
    );

    let cursor_x = x_at(scene.cursor_percent);
    painter.line_segment(
        [Pos2::new(cursor_x, track.top()), Pos2::new(cursor_x, track.bottom())],
        Stroke::new(1.5, CURSOR),
    );

    for handle in &scene.handles {
        let color = if deleting {
            HANDLE_DELETE
        } else if handle.held {
            HANDLE_HELD
        } else {
            HANDLE
        };
        let x = x_at(handle.percent);
        let handle_rect = Rect::from_center_size(
            Pos2::new(x, track.center().y),
            egui::vec2(HANDLE_WIDTH, TRACK_HEIGHT),
        );
        painter.rect_filled(handle_rect, 2.0, color);
    }
}
