//! Grab-handle selection and deletion mode.

pub use crate::core::timeline::BoundaryKind;

/// The boundary handle a pointer is holding: `intervals[index]`'s start or end.
///
/// "Nothing grabbed" is `Option::<GrabHandle>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabHandle {
    pub index: usize,
    pub kind: BoundaryKind,
}

impl GrabHandle {
    pub fn start(index: usize) -> Self {
        Self {
            index,
            kind: BoundaryKind::Start,
        }
    }

    pub fn end(index: usize) -> Self {
        Self {
            index,
            kind: BoundaryKind::End,
        }
    }
}

/// Transient advisory shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Deletion mode is active and waits for a click on a handle.
    DeleteGrabber,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::DeleteGrabber => {
                "Please click on the grabber (either start or end) to delete it"
            }
        }
    }
}

/// While active, pressing a handle deletes its interval instead of grabbing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeletionMode {
    active: bool,
}

impl DeletionMode {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the mode and return the notice to display, if any.
    pub fn toggle(&mut self) -> Option<Notice> {
        self.active = !self.active;
        self.notice()
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    pub fn notice(&self) -> Option<Notice> {
        self.active.then_some(Notice::DeleteGrabber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_shows_notice_only_when_active() {
        let mut mode = DeletionMode::default();
        assert_eq!(mode.toggle(), Some(Notice::DeleteGrabber));
        assert!(mode.is_active());
        assert_eq!(mode.toggle(), None);
        assert!(!mode.is_active());
    }

    #[test]
    fn test_clear() {
        let mut mode = DeletionMode::default();
        mode.toggle();
        mode.clear();
        assert_eq!(mode.notice(), None);
    }
}
