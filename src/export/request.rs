//! Hand-off payload for the trim/export backend.
//!
//! The backend receives the kept intervals in seconds and an optional crop
//! rectangle in percent of the frame. Field names match what the backend
//! deserializes: `timings[].start`, `timings[].end` and
//! `dimensions.{x, y, width, height}`.

use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;
use crate::core::timeline::{EditError, Timeline};

/// Error type for export hand-off
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No timeline: media metadata has not loaded")]
    NoTimeline,
    #[error("Timeline is inconsistent: {0}")]
    InvalidTimeline(#[from] EditError),
    #[error("Invalid crop rectangle: {0}")]
    InvalidCrop(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Export backend refused the request: {0}")]
    Backend(String),
}

/// One kept range in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub start: f64,
    pub end: f64,
}

impl From<Interval> for Timing {
    fn from(interval: Interval) -> Self {
        Self {
            start: interval.start_seconds(),
            end: interval.end_seconds(),
        }
    }
}

/// Crop region, every field in percent (0–100) of the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// Validated constructor: position in range, positive size, fits in the frame.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, ExportError> {
        let rect = Self { x, y, width, height };
        rect.validate()?;
        Ok(rect)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        let fields = [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ExportError::InvalidCrop(format!(
                    "{} = {} is outside 0..=100",
                    name, value
                )));
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ExportError::InvalidCrop("empty rectangle".to_string()));
        }
        if self.x + self.width > 100.0 || self.y + self.height > 100.0 {
            return Err(ExportError::InvalidCrop(
                "rectangle extends past the frame".to_string(),
            ));
        }
        Ok(())
    }
}

/// Snapshot of the kept intervals plus crop, ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub timings: Vec<Timing>,
    pub dimensions: Option<CropRect>,
}

impl ExportRequest {
    /// Snapshot `timeline`. The timeline is re-validated so the backend never
    /// receives overlapping or out-of-range intervals.
    pub fn from_timeline(timeline: &Timeline, crop: Option<CropRect>) -> Result<Self, ExportError> {
        timeline.validate()?;
        if let Some(rect) = &crop {
            rect.validate()?;
        }
        Ok(Self {
            timings: timeline.snapshot().into_iter().map(Timing::from).collect(),
            dimensions: crop,
        })
    }

    /// Total kept time in seconds.
    pub fn kept_seconds(&self) -> f64 {
        self.timings.iter().map(|t| t.end - t.start).sum()
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }
}
