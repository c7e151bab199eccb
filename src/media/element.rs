//! Media playback element collaborator.
//!
//! The trim controller never decodes anything itself. It reads the play
//! position of an external player and sends it seek/play/pause commands
//! through this trait. Positions are seconds, as reported by the player.

/// A player exposing a seekable position and play/pause control.
pub trait MediaElement {
    /// Current play position in seconds.
    fn current_time(&self) -> f64;

    /// Seek to a position in seconds.
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds; `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;

    fn is_paused(&self) -> bool;

    fn play(&mut self);

    fn pause(&mut self);

    fn set_muted(&mut self, muted: bool);
}
