//! Pointer/keyboard handling for boundary handles.

pub mod drag;
pub mod grab;
pub mod input;

pub use drag::{DragController, DragOutcome, DragState, TrackGeometry};
pub use grab::{BoundaryKind, DeletionMode, GrabHandle, Notice};
pub use input::{InputBus, Key, PointerEvent, PointerSubscription};
