//! Core trait defining registry behavior.
//!
//! This module provides the `ObservableApi` trait with default implementations for
//! registration, removal, snapshot-based notification and tracing of observers.
//!
//! Implementors only supply the storage: the subscriber list and the trace slot.
//! Everything else, including the locking discipline, lives here so that owned
//! registries ([`ObserverRegistry`](crate::ObserverRegistry)) and global ones
//! ([`define_observer_registry!`](crate::define_observer_registry)) behave the same.
//!
//! # Locking discipline
//!
//! - The subscriber lock is held only to read or modify the set, never while
//!   user code runs (observer callbacks, `Observer::name`, observer drops, the
//!   trace callback).
//! - Every call into observer code, `name()` included, is guarded by
//!   `catch_unwind`, so a misbehaving observer cannot abort a round or a
//!   registration.
//! - `notify` copies the list under the lock and dispatches to the copy, so a
//!   callback may register, unregister or notify on the same registry.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use crate::observer::name_of;
use crate::{CallbackFailure, NotifyReport, Observer, RegistryEvent, SubscriberSet};

/// Type alias for the user-supplied tracing callback.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Storage for the trace callback.
pub type TraceSlot = Mutex<Option<Arc<TraceCallback>>>;

/// Storage for the registered observers, in insertion order.
pub type Subscribers = Mutex<SubscriberSet>;

/// Core trait defining registry behavior.
///
/// Provides default implementations for all registry operations, requiring only
/// two accessor methods (`subscribers` and `trace`) to be implemented.
///
/// Observers are unique by identity: registering a clone of an already registered
/// `Arc` has no effect. Dispatch order is registration order.
pub trait ObservableApi {
    // -------------------------------------------------------------------------------------------------
    // Storage
    // -------------------------------------------------------------------------------------------------

    /// Access the subscriber list.
    fn subscribers(&self) -> &Subscribers;

    /// Access the trace callback slot.
    fn trace(&self) -> &TraceSlot;

    /// Name used in log records.
    fn label(&self) -> &str {
        "observer-registry"
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for registry operations.
    ///
    /// The callback is invoked after every register, unregister, notify and clear.
    ///
    /// The callback runs after all registry locks are released, so it may call
    /// back into the same registry.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// Registered observers are not affected.
    fn clear_trace_callback(&self) {
        let mut guard = self.trace().lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Emit a registry event to the current callback, if any.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic propagates to the caller.
    /// No registry lock is held at that point, so storage is never poisoned by it.
    fn emit_event(&self, event: &RegistryEvent) {
        let callback = self
            .trace()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Register an observer.
    ///
    /// Idempotent: a handle that is already registered (same allocation) is
    /// left in place and keeps its position in dispatch order.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// A poisoned lock is recovered. No user code ever runs under the
    /// subscriber lock, so the set is always left consistent.
    fn register(&self, observer: Arc<dyn Observer>) {
        let name = name_of(&*observer);

        let added = self
            .subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(observer);

        tracing::debug!(registry = %self.label(), observer = %name, added, "register");
        self.emit_event(&RegistryEvent::Register {
            observer: name,
            added,
        });
    }

    /// Remove an observer if it is registered; no-op otherwise.
    fn unregister<O>(&self, observer: &Arc<O>)
    where
        O: Observer + ?Sized,
    {
        let name = name_of(&**observer);

        let removed = self
            .subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(observer);
        let was_removed = removed.is_some();
        // registry's handle is dropped outside the lock
        drop(removed);

        tracing::debug!(registry = %self.label(), observer = %name, removed = was_removed, "unregister");
        self.emit_event(&RegistryEvent::Unregister {
            observer: name,
            removed: was_removed,
        });
    }

    /// Notify every observer in a snapshot of the current set.
    ///
    /// The set is copied under the lock, the lock is released, and each observer
    /// in the copy gets `on_update()` in registration order. Registrations and
    /// removals racing with the copy are either fully included or fully excluded.
    ///
    /// A panicking observer does not stop the round: the panic is caught, logged
    /// at `warn` and returned in the [`NotifyReport`].
    fn notify(&self) -> NotifyReport {
        let snapshot = self.snapshot();
        let mut failures = Vec::new();

        for observer in &snapshot {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| observer.on_update())) {
                let failure = CallbackFailure::from_panic(&name_of(&**observer), payload);
                tracing::warn!(
                    registry = %self.label(),
                    observer = %failure.observer,
                    error = %failure.message,
                    "observer callback failed"
                );
                failures.push(failure);
            }
        }

        let report = NotifyReport {
            observers: snapshot.len(),
            failures,
        };
        drop(snapshot);

        tracing::trace!(
            registry = %self.label(),
            observers = report.observers,
            failed = report.failures.len(),
            "notify"
        );
        self.emit_event(&RegistryEvent::Notify {
            observers: report.observers,
            failed: report.failures.len(),
        });

        report
    }

    /// Structural copy of the current observer set, in dispatch order.
    fn snapshot(&self) -> Vec<Arc<dyn Observer>> {
        self.subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .to_vec()
    }

    /// Check whether this exact handle is registered.
    fn contains<O>(&self, observer: &Arc<O>) -> bool
    where
        O: Observer + ?Sized,
    {
        self.subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(observer)
    }

    /// Number of registered observers.
    fn len(&self) -> usize {
        self.subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` if no observer is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all observers.
    ///
    /// Does not affect the tracing callback (use `clear_trace_callback()` for that),
    /// and does not affect observer handles held elsewhere.
    fn clear(&self) {
        let removed = self
            .subscribers()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take_all();
        let count = removed.len();
        drop(removed);

        tracing::debug!(registry = %self.label(), removed = count, "clear");
        self.emit_event(&RegistryEvent::Clear { removed: count });
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
