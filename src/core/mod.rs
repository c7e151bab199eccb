//! Core types for the trim timeline.
//!
//! This module provides the fundamental data structures: kept intervals, the
//! timeline that orders them, time representation and trim configuration.
//! All time values are in nanoseconds (i64).

pub mod config;
pub mod interval;
pub mod time;
pub mod timeline;

// Re-export core data structures for easier access.
pub use config::{ConfigError, TrimConfig};
pub use interval::Interval;
pub use time::Time;
pub use timeline::{BoundaryKind, EditError, Timeline};
