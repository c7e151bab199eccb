//! Multi-segment trim timeline for a desktop video editor.
//!
//! The kept ranges of a clip live in an immutable [`core::Timeline`]; the
//! [`controller::TrimController`] applies pointer, keyboard and playback
//! events to it and steers a [`media::MediaElement`] so that only kept
//! content plays.

pub mod controller;
pub mod core;
pub mod export;
pub mod interaction;
pub mod media;
pub mod playback;
pub mod ui;
pub mod visual;

pub use controller::TrimController;
