//! Integration tests demonstrating how to build a registry WITHOUT the macro.
//!
//! Implementing `ObservableApi` by hand only requires pointing it at a subscriber
//! list and a trace slot. This is what `define_observer_registry!` expands to.
//!
//! NOTE: All tests use #[serial] because they share the same static registry (MY_REGISTRY).
//! Running them in parallel would cause interference and non-deterministic failures.

use observer_registry::{
    observer_fn, Notifier, NotifierConfig, ObservableApi, Observer, RegistryEvent, SubscriberSet,
    Subscribers, TraceSlot,
};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};
use std::time::{Duration, Instant};

// ============================================================================
// Manual Registry Implementation (Without Macro)
// ============================================================================

/// Define the static subscriber storage for our registry
static MY_SUBSCRIBERS: LazyLock<Subscribers> = LazyLock::new(|| Mutex::new(SubscriberSet::new()));

/// Define the static trace callback storage
static MY_TRACE: LazyLock<TraceSlot> = LazyLock::new(|| Mutex::new(None));

/// Our custom registry API implementation
struct MyRegistry;

impl ObservableApi for MyRegistry {
    fn subscribers(&self) -> &Subscribers {
        &MY_SUBSCRIBERS
    }

    fn trace(&self) -> &TraceSlot {
        &MY_TRACE
    }

    fn label(&self) -> &str {
        "my-registry"
    }
}

/// Constant instance of our registry
const MY_REGISTRY: MyRegistry = MyRegistry;

struct Counter(AtomicUsize);

impl Counter {
    fn new() -> Arc<Self> {
        Arc::new(Counter(AtomicUsize::new(0)))
    }

    fn hits(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Observer for Counter {
    fn on_update(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Tests Using Manual Implementation
// ============================================================================

#[test]
#[serial]
fn test_register_notify_unregister() {
    MY_REGISTRY.clear();

    let a = Counter::new();
    let b = Counter::new();
    MY_REGISTRY.register(a.clone());
    MY_REGISTRY.register(b.clone());

    let report = MY_REGISTRY.notify();
    assert_eq!(report.observers, 2);
    assert_eq!((a.hits(), b.hits()), (1, 1));

    MY_REGISTRY.unregister(&a);
    let report = MY_REGISTRY.notify();
    assert_eq!(report.observers, 1);
    assert_eq!((a.hits(), b.hits()), (1, 2));

    MY_REGISTRY.clear();
}

#[test]
#[serial]
fn test_idempotent_operations() {
    MY_REGISTRY.clear();

    let a = Counter::new();
    MY_REGISTRY.register(a.clone());
    MY_REGISTRY.register(a.clone());
    assert_eq!(MY_REGISTRY.len(), 1);

    let absent = Counter::new();
    MY_REGISTRY.unregister(&absent);
    assert_eq!(MY_REGISTRY.len(), 1);
    assert!(MY_REGISTRY.contains(&a));

    MY_REGISTRY.clear();
}

#[test]
#[serial]
fn test_manual_tracing() {
    MY_REGISTRY.clear();

    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    MY_REGISTRY.set_trace_callback(move |event| {
        events_clone.lock().unwrap().push(event.clone());
    });

    MY_REGISTRY.register(observer_fn(|| {}));
    MY_REGISTRY.clear();
    MY_REGISTRY.clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert!(matches!(captured[0], RegistryEvent::Register { added: true, .. }));
    assert_eq!(captured[1], RegistryEvent::Clear { removed: 1 });
}

#[test]
#[serial]
fn test_notifier_drives_manual_registry() {
    MY_REGISTRY.clear();

    let a = Counter::new();
    MY_REGISTRY.register(a.clone());

    let notifier = Notifier::spawn(
        Arc::new(MY_REGISTRY),
        NotifierConfig::default()
            .with_interval(Duration::from_millis(2))
            .with_thread_name("manual-notifier"),
    )
    .unwrap();

    let start = Instant::now();
    while a.hits() < 2 && start.elapsed() < Duration::from_secs(5) {
        std::thread::sleep(Duration::from_millis(1));
    }

    let stats = notifier.stop().unwrap();
    assert!(a.hits() >= 2);
    assert_eq!(stats.ticks as usize, a.hits());

    MY_REGISTRY.clear();
}
