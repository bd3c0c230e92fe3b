//! The subscriber side of the registry.
//!
//! An [`Observer`] exposes a single notification operation, [`Observer::on_update`].
//! The registry knows nothing else about its subscribers: it never inspects their
//! state and never owns their lifetimes beyond the `Arc` it was handed.
//!
//! Any `Fn() + Send + Sync` closure is an observer, so ad-hoc subscribers do not
//! need a dedicated type.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A subscriber notified by the registry on every `notify` call.
///
/// Implementors must be `Send + Sync` because notifications are dispatched from
/// whichever thread calls `notify`.
///
/// # Examples
///
/// ```rust
/// use observer_registry::Observer;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Counter(AtomicUsize);
///
/// impl Observer for Counter {
///     fn on_update(&self) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
/// ```
pub trait Observer: Send + Sync {
    /// Called once per `notify` call that includes this observer in its snapshot.
    ///
    /// A panic raised here is caught by the registry and reported as a
    /// [`CallbackFailure`](crate::CallbackFailure); other observers still run.
    fn on_update(&self);

    /// Label used in logs and failure reports.
    ///
    /// A panic raised here is caught as well; the registry then reports the
    /// observer as `<unnamed>`.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Observer for F
where
    F: Fn() + Send + Sync,
{
    fn on_update(&self) {
        self()
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Wraps a closure into an observer handle.
///
/// Every call allocates a new handle, so two calls with equivalent closures
/// produce two distinct observers.
///
/// ```rust
/// use observer_registry::{observer_fn, ObservableApi, ObserverRegistry};
///
/// let registry = ObserverRegistry::new();
/// let handle = observer_fn(|| println!("updated"));
/// registry.register(handle.clone());
/// assert!(registry.contains(&handle));
/// ```
pub fn observer_fn(f: impl Fn() + Send + Sync + 'static) -> Arc<dyn Observer> {
    Arc::new(f)
}

/// Returns `true` when both handles point to the same observer allocation.
///
/// Only the data pointer is compared; vtable pointers for the same type may
/// differ between codegen units.
pub fn same_observer<A, B>(a: &Arc<A>, b: &Arc<B>) -> bool
where
    A: Observer + ?Sized,
    B: Observer + ?Sized,
{
    std::ptr::eq(Arc::as_ptr(a).cast::<()>(), Arc::as_ptr(b).cast::<()>())
}

/// Placeholder reported for an observer whose `name()` panicked.
pub(crate) const UNNAMED: &str = "<unnamed>";

/// Calls `observer.name()` with panics contained.
pub(crate) fn name_of<O: Observer + ?Sized>(observer: &O) -> String {
    panic::catch_unwind(AssertUnwindSafe(|| observer.name().to_string()))
        .unwrap_or_else(|_| UNNAMED.to_string())
}
