//! # Observer Registry
//!
//! A thread-safe publish/subscribe registry: observers can be registered,
//! unregistered and notified from any thread, at any time, including from inside
//! an observer's own callback.
//!
//! ## Quick Start
//!
//! ```rust
//! use observer_registry::{observer_fn, ObservableApi, ObserverRegistry};
//!
//! let registry = ObserverRegistry::new();
//! let observer = observer_fn(|| println!("updated"));
//!
//! registry.register(observer.clone());
//! let report = registry.notify();
//! assert_eq!(report.observers, 1);
//!
//! registry.unregister(&observer);
//! assert!(registry.is_empty());
//! ```
//!
//! ## How notification works
//!
//! `notify` locks the subscriber list only long enough to copy it, then calls
//! every observer in the copy with no lock held. As a consequence:
//!
//! - a slow observer never blocks `register`/`unregister`/`notify` on other threads;
//! - an observer may call back into the same registry without deadlocking;
//! - a round dispatches to the set as it was when the copy was taken. Changes
//!   that complete after the copy are seen by the next round.
//!
//! A panicking observer is isolated: the remaining observers of the round still
//! run, and the failure is returned in the [`NotifyReport`].
//!
//! ## Features
//!
//! - **Owned registries**: [`ObserverRegistry`]
//! - **Global registries**: [`define_observer_registry!`]
//! - **Background notification**: [`Notifier`] with cooperative stop
//! - **Tracing support**: `tracing` log records plus an optional [`RegistryEvent`] callback

mod macros;
mod notifier;
mod observer;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod subscriber_set;

pub use notifier::{Notifier, NotifierConfig, NotifierStats};
pub use observer::{observer_fn, same_observer, Observer};
pub use registry::ObserverRegistry;
pub use registry_error::{CallbackFailure, NotifierError, NotifyError, NotifyReport};
pub use registry_event::RegistryEvent;
pub use registry_trait::{ObservableApi, Subscribers, TraceCallback, TraceSlot};
pub use subscriber_set::SubscriberSet;
