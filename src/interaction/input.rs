//! Pointer and keyboard input source.
//!
//! The window forwards every raw pointer event here. Components that need
//! pointer events outside their own hit area (a boundary drag leaving the
//! handle) take a [`PointerSubscription`]; dropping the subscription is the
//! only way to detach it, so a listener can never outlive its drag.

use std::sync::{Arc, Weak};

use crossbeam::channel;

/// Raw pointer event in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

/// Keys the trim timeline reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

struct Listener {
    tx: channel::Sender<PointerEvent>,
    alive: Weak<()>,
}

/// Fan-out of pointer events to the currently attached subscriptions.
#[derive(Default)]
pub struct InputBus {
    listeners: Vec<Listener>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener that receives every pointer event until dropped.
    pub fn subscribe_pointer(&mut self) -> PointerSubscription {
        let (tx, rx) = channel::unbounded();
        let token = Arc::new(());
        self.listeners.push(Listener {
            tx,
            alive: Arc::downgrade(&token),
        });
        tracing::trace!(listeners = self.listeners.len(), "pointer listener attached");
        PointerSubscription { rx, _token: token }
    }

    /// Deliver a pointer event to every live subscription.
    pub fn emit(&mut self, event: PointerEvent) {
        self.prune();
        for listener in &self.listeners {
            // A send can only fail if the receiver is gone, which prune just handled
            let _ = listener.tx.send(event);
        }
    }

    /// Number of subscriptions still attached.
    pub fn listener_count(&mut self) -> usize {
        self.prune();
        self.listeners.len()
    }

    fn prune(&mut self) {
        self.listeners.retain(|l| l.alive.strong_count() > 0);
    }
}

/// Scoped pointer listener. Detached from the [`InputBus`] when dropped.
pub struct PointerSubscription {
    rx: channel::Receiver<PointerEvent>,
    _token: Arc<()>,
}

impl PointerSubscription {
    /// Take the next queued event, if any.
    pub fn try_next(&self) -> Option<PointerEvent> {
        self.rx.try_recv().ok()
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("pending", &self.rx.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_receives_events() {
        let mut bus = InputBus::new();
        let sub = bus.subscribe_pointer();

        bus.emit(PointerEvent::Move { x: 10.0, y: 0.0 });
        bus.emit(PointerEvent::Up { x: 12.0, y: 0.0 });

        assert_eq!(sub.try_next(), Some(PointerEvent::Move { x: 10.0, y: 0.0 }));
        assert_eq!(sub.try_next(), Some(PointerEvent::Up { x: 12.0, y: 0.0 }));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn test_drop_detaches_listener() {
        let mut bus = InputBus::new();
        let sub = bus.subscribe_pointer();
        assert_eq!(bus.listener_count(), 1);

        drop(sub);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_repeated_subscriptions_do_not_accumulate() {
        let mut bus = InputBus::new();
        for _ in 0..50 {
            let sub = bus.subscribe_pointer();
            bus.emit(PointerEvent::Move { x: 1.0, y: 1.0 });
            assert!(sub.try_next().is_some());
        }
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_events_before_subscription_are_not_delivered() {
        let mut bus = InputBus::new();
        bus.emit(PointerEvent::Move { x: 1.0, y: 1.0 });
        let sub = bus.subscribe_pointer();
        assert_eq!(sub.try_next(), None);
    }
}
