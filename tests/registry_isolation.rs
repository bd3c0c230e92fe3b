//! Integration tests for registry isolation and multiple registries.
//!
//! Every `define_observer_registry!` invocation owns its own subscriber list and
//! trace slot; owned `ObserverRegistry` instances are likewise independent.

use observer_registry::{define_observer_registry, observer_fn, ObservableApi, ObserverRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_multiple_isolated_registries() {
    define_observer_registry!(network);
    define_observer_registry!(battery);
    define_observer_registry!(locale);

    let network_hits = Arc::new(AtomicUsize::new(0));
    let hits = network_hits.clone();
    network::register(observer_fn(move || {
        hits.fetch_add(1, Ordering::SeqCst);
    }));
    battery::register(observer_fn(|| {}));
    battery::register(observer_fn(|| {}));

    assert_eq!(network::len(), 1);
    assert_eq!(battery::len(), 2);
    assert!(locale::is_empty());

    // Notifying one registry never reaches another registry's observers.
    let _ = battery::notify();
    let _ = locale::notify();
    assert_eq!(network_hits.load(Ordering::SeqCst), 0);

    let _ = network::notify();
    assert_eq!(network_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_same_observer_in_different_registries() {
    define_observer_registry!(reg_a);
    define_observer_registry!(reg_b);

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_clone = hits.clone();
    let observer = observer_fn(move || {
        hits_clone.fetch_add(1, Ordering::SeqCst);
    });

    reg_a::register(observer.clone());
    reg_b::register(observer.clone());

    // Removing from one registry leaves the other untouched.
    reg_a::unregister(&observer);
    assert!(!reg_a::contains(&observer));
    assert!(reg_b::contains(&observer));

    let _ = reg_a::notify();
    let _ = reg_b::notify();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registry_scoping() {
    // Registries with the same name in different modules are distinct.
    mod module_a {
        use observer_registry::{define_observer_registry, observer_fn};
        define_observer_registry!(scoped);

        pub fn setup() {
            scoped::register(observer_fn(|| {}));
        }

        pub fn count() -> usize {
            scoped::len()
        }
    }

    mod module_b {
        use observer_registry::{define_observer_registry, observer_fn};
        define_observer_registry!(scoped);

        pub fn setup() {
            scoped::register(observer_fn(|| {}));
            scoped::register(observer_fn(|| {}));
        }

        pub fn count() -> usize {
            scoped::len()
        }
    }

    module_a::setup();
    module_b::setup();

    assert_eq!(module_a::count(), 1);
    assert_eq!(module_b::count(), 2);
}

#[test]
fn test_owned_registries_are_independent() {
    let first = ObserverRegistry::named("first");
    let second = ObserverRegistry::named("second");

    let observer = observer_fn(|| {});
    first.register(observer.clone());

    assert!(first.contains(&observer));
    assert!(!second.contains(&observer));

    first.clear();
    assert!(first.is_empty());
    assert!(second.is_empty());
}

#[test]
fn test_registry_with_tracing_isolation() {
    define_observer_registry!(traced_a);
    define_observer_registry!(traced_b);

    let events = Arc::new(std::sync::Mutex::new(Vec::new()));
    let events_clone = events.clone();

    traced_a::set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(format!("{}", event));
    });

    traced_a::register(observer_fn(|| {}));
    traced_b::register(observer_fn(|| {}));

    // Only traced_a should have events
    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].contains("register"));
}
