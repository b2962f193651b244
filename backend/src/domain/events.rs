//! # Change events
//!
//! Explicit observer plumbing between domain services: a mutation publishes
//! a `ChangeEvent` and dependent consumers (history, statistics,
//! localization) react to it. This replaces ambient global event dispatch
//! with a subscription interface owned by the orchestrator.

use log::debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Cross-service change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    VehiclesChanged,
    TripsChanged,
    HistoryCleared,
    LanguageChanged,
    DataImported,
}

type Subscriber = Box<dyn Fn(ChangeEvent) + Send + Sync>;

/// Subscriber registry. Handlers run synchronously on the publishing
/// thread, in subscription order. Handlers must not publish or subscribe
/// re-entrantly.
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(ChangeEvent) + Send + Sync + 'static,
    {
        self.subscribers.lock().unwrap().push(Box::new(handler));
    }

    pub fn publish(&self, event: ChangeEvent) {
        debug!("publishing {:?}", event);
        for handler in self.subscribers.lock().unwrap().iter() {
            handler(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Trailing-edge debouncer for refresh work.
///
/// Each `mark` pushes the deadline one window into the future; `fire`
/// reports true once the deadline has passed and clears it. A burst of
/// change events within one window therefore coalesces into a single
/// recomputation. The guard is explicit state, not a property of the
/// single-threaded caller.
#[derive(Debug)]
pub struct RefreshDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl RefreshDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    pub fn mark_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn every_subscriber_sees_every_event() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let count = count.clone();
            bus.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.publish(ChangeEvent::TripsChanged);
        bus.publish(ChangeEvent::VehiclesChanged);
        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn subscribers_receive_the_published_event() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe(move |event| sink.lock().unwrap().push(event));

        bus.publish(ChangeEvent::HistoryCleared);
        assert_eq!(*seen.lock().unwrap(), vec![ChangeEvent::HistoryCleared]);
    }

    #[test]
    fn debouncer_coalesces_marks_within_the_window() {
        let mut debouncer = RefreshDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        debouncer.mark_at(start);
        debouncer.mark_at(start + Duration::from_millis(30));
        debouncer.mark_at(start + Duration::from_millis(60));

        // Still inside the window of the last mark
        assert!(!debouncer.fire_at(start + Duration::from_millis(120)));
        // One firing once the window since the last mark has elapsed
        assert!(debouncer.fire_at(start + Duration::from_millis(160)));
        // And only one
        assert!(!debouncer.fire_at(start + Duration::from_millis(400)));
    }

    #[test]
    fn debouncer_is_idle_until_marked() {
        let mut debouncer = RefreshDebouncer::new(Duration::from_millis(100));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.fire_at(Instant::now() + Duration::from_secs(10)));

        debouncer.mark();
        assert!(debouncer.is_pending());
    }
}
