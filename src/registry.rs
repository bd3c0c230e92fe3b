//! An owned, thread-safe observer registry.
//!
//! [`ObserverRegistry`] is the instance form of the registry: create one per event
//! source, share it behind an `Arc`, and let any thread register, unregister or
//! notify at any time. All operations come from [`ObservableApi`].
//!
//! # Examples
//!
//! ```
//! use observer_registry::{observer_fn, ObservableApi, ObserverRegistry};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let registry = ObserverRegistry::named("settings");
//! let hits = Arc::new(AtomicUsize::new(0));
//!
//! let hits_clone = hits.clone();
//! let observer = observer_fn(move || {
//!     hits_clone.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! registry.register(observer.clone());
//! let report = registry.notify();
//! assert!(report.is_clean());
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//!
//! registry.unregister(&observer);
//! let _ = registry.notify();
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::registry_trait::{ObservableApi, Subscribers, TraceSlot};
use crate::SubscriberSet;

/// Thread-safe set of observers with snapshot-based notification.
///
/// The registry holds `Arc` handles only. Dropping it releases those handles
/// but never tears down observers that are still referenced elsewhere.
pub struct ObserverRegistry {
    name: String,
    subscribers: Subscribers,
    trace: TraceSlot,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::named("observer-registry")
    }

    /// Creates an empty registry whose log records carry `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subscribers: Mutex::new(SubscriberSet::new()),
            trace: Mutex::new(None),
        }
    }

    /// Creates an empty registry with room for `capacity` observers.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            subscribers: Mutex::new(SubscriberSet::with_capacity(capacity)),
            trace: Mutex::new(None),
        }
    }

    /// Name carried by this registry's log records.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservableApi for ObserverRegistry {
    fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }

    fn trace(&self) -> &TraceSlot {
        &self.trace
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        let traced = self
            .trace
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();

        f.debug_struct("ObserverRegistry")
            .field("name", &self.name)
            .field("observers", &observers)
            .field("traced", &traced)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{observer_fn, Observer};

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc, Barrier};
    use std::thread;

    struct Counter(AtomicUsize);

    impl Observer for Counter {
        fn on_update(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counter() -> Arc<Counter> {
        Arc::new(Counter(AtomicUsize::new(0)))
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ObserverRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.name(), "observer-registry");

        let report = registry.notify();
        assert_eq!(report.observers, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_named_and_capacity_constructors() {
        let registry = ObserverRegistry::with_capacity("prefs", 8);
        assert_eq!(registry.name(), "prefs");
        assert_eq!(registry.label(), "prefs");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_two_then_unregister_one() {
        let registry = ObserverRegistry::new();
        let a = counter();
        let b = counter();

        registry.register(a.clone());
        registry.register(b.clone());
        let _ = registry.notify();
        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 1);

        registry.unregister(&a);
        let _ = registry.notify();
        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_registry_does_not_own_observer_lifetime() {
        let a = counter();
        {
            let registry = ObserverRegistry::new();
            registry.register(a.clone());
            assert_eq!(Arc::strong_count(&a), 2);
        }
        assert_eq!(Arc::strong_count(&a), 1);
    }

    #[test]
    fn test_debug_format() {
        let registry = ObserverRegistry::named("dbg");
        registry.register(observer_fn(|| {}));
        assert_eq!(
            format!("{:?}", registry),
            "ObserverRegistry { name: \"dbg\", observers: 1, traced: false }"
        );
    }

    #[test]
    fn test_thread_safety() {
        let registry = Arc::new(ObserverRegistry::new());
        let barrier = Arc::new(Barrier::new(2));
        let (tx, rx) = mpsc::channel();

        let a = counter();
        let registry_clone = registry.clone();
        let barrier_clone = barrier.clone();
        let a_clone = a.clone();
        let handle = thread::spawn(move || {
            registry_clone.register(a_clone);
            tx.send(()).unwrap();

            // Wait for the main thread to register its observer
            barrier_clone.wait();
            let _ = registry_clone.notify();
        });

        rx.recv().unwrap();
        let b = counter();
        registry.register(b.clone());
        barrier.wait();

        handle.join().unwrap();
        assert_eq!(a.0.load(Ordering::SeqCst), 1);
        assert_eq!(b.0.load(Ordering::SeqCst), 1);
    }
}
