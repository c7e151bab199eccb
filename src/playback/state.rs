//! Playback state as shown to the user.
//!
//! Derived on demand from the media element and the drag controller; never stored.

use crate::core::time::Time;
use crate::interaction::grab::GrabHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No media attached, or its metadata has not loaded yet.
    Unloaded,
    /// Paused at a position (nanoseconds)
    Paused { position: Time },
    /// Playing from a position (nanoseconds)
    Playing { position: Time },
    /// A boundary handle is being dragged; the player shows the preview frame.
    Scrubbing { grab: GrabHandle, position: Time },
}

impl PlaybackState {
    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing { .. })
    }

    /// Check if a drag owns the player
    pub fn is_scrubbing(&self) -> bool {
        matches!(self, PlaybackState::Scrubbing { .. })
    }

    /// Current position, if any media is loaded
    pub fn position(&self) -> Option<Time> {
        match *self {
            PlaybackState::Unloaded => None,
            PlaybackState::Paused { position }
            | PlaybackState::Playing { position }
            | PlaybackState::Scrubbing { position, .. } => Some(position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        assert_eq!(PlaybackState::Unloaded.position(), None);
        assert_eq!(PlaybackState::Playing { position: 5 }.position(), Some(5));
        let scrubbing = PlaybackState::Scrubbing {
            grab: GrabHandle::start(0),
            position: 7,
        };
        assert!(scrubbing.is_scrubbing());
        assert!(!scrubbing.is_playing());
        assert_eq!(scrubbing.position(), Some(7));
    }
}
