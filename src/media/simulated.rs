//! In-process media element driven by a manual clock.
//! Used by the preview binary and by tests in place of a real player.

use crate::media::element::MediaElement;

/// Interval between "time update" notifications, in seconds.
/// Matches the ~4 Hz cadence of browser media elements.
pub const TICK_INTERVAL: f64 = 0.25;

/// A player with no decoder behind it: position only advances when told to.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    current_time: f64,
    duration: f64,
    metadata_loaded: bool,
    paused: bool,
    muted: bool,
    since_last_tick: f64,
    seeks: Vec<f64>,
}

impl SimulatedMedia {
    /// Create a paused player whose metadata has not loaded yet.
    pub fn new(duration: f64) -> Self {
        Self {
            current_time: 0.0,
            duration,
            metadata_loaded: false,
            paused: true,
            muted: false,
            since_last_tick: 0.0,
            seeks: Vec::new(),
        }
    }

    /// Create a player with metadata already available.
    pub fn loaded(duration: f64) -> Self {
        let mut media = Self::new(duration);
        media.load_metadata();
        media
    }

    /// Make the duration visible. Returns true the first time, like a "loadedmetadata" event.
    pub fn load_metadata(&mut self) -> bool {
        let first = !self.metadata_loaded;
        self.metadata_loaded = true;
        first
    }

    /// Advance the clock by `dt` seconds while playing.
    ///
    /// Returns true when a "time update" notification is due. Playback stops
    /// on its own at the end of the media.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.paused || !self.metadata_loaded {
            return false;
        }
        self.current_time = (self.current_time + dt).min(self.duration);
        self.since_last_tick += dt;
        if self.current_time >= self.duration {
            self.paused = true;
            self.since_last_tick = 0.0;
            return true;
        }
        if self.since_last_tick >= TICK_INTERVAL {
            self.since_last_tick = 0.0;
            return true;
        }
        false
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Every seek issued so far, oldest first.
    pub fn seeks(&self) -> &[f64] {
        &self.seeks
    }

    pub fn last_seek(&self) -> Option<f64> {
        self.seeks.last().copied()
    }
}

impl MediaElement for SimulatedMedia {
    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds.clamp(0.0, self.duration);
        self.seeks.push(self.current_time);
    }

    fn duration(&self) -> Option<f64> {
        self.metadata_loaded.then_some(self.duration)
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_hidden_until_metadata() {
        let mut media = SimulatedMedia::new(10.0);
        assert_eq!(media.duration(), None);
        assert!(media.load_metadata());
        assert!(!media.load_metadata());
        assert_eq!(media.duration(), Some(10.0));
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut media = SimulatedMedia::loaded(10.0);
        assert!(!media.advance(1.0));
        assert_eq!(media.current_time(), 0.0);

        media.play();
        assert!(media.advance(0.3));
        assert!((media.current_time() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut media = SimulatedMedia::loaded(1.0);
        media.play();
        assert!(media.advance(5.0));
        assert_eq!(media.current_time(), 1.0);
        assert!(media.is_paused());
    }

    #[test]
    fn test_seeks_are_recorded_and_clamped() {
        let mut media = SimulatedMedia::loaded(10.0);
        media.set_current_time(12.0);
        media.set_current_time(-1.0);
        assert_eq!(media.seeks(), &[10.0, 0.0]);
    }
}
