//! Basic usage example for observer-registry.
//!
//! Demonstrates:
//! - Registering struct and closure observers
//! - Notifying a snapshot of the current observers
//! - Idempotent register / unregister
//! - Failure isolation when an observer panics
//!
//! Run with: `RUST_LOG=observer_registry=debug cargo run --example basic_usage`

use observer_registry::{observer_fn, ObservableApi, Observer, ObserverRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Screen {
    title: &'static str,
    redraws: AtomicUsize,
}

impl Observer for Screen {
    fn on_update(&self) {
        let n = self.redraws.fetch_add(1, Ordering::SeqCst) + 1;
        println!("   {} redrawn ({n})", self.title);
    }

    fn name(&self) -> &str {
        self.title
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "observer_registry=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== observer-registry: Basic Usage ===\n");

    let registry = ObserverRegistry::named("settings");

    // -------------------------------------------------------------------------
    // 1. Register observers
    // -------------------------------------------------------------------------
    println!("1. Registering observers...");

    let home = Arc::new(Screen {
        title: "home",
        redraws: AtomicUsize::new(0),
    });
    let profile = Arc::new(Screen {
        title: "profile",
        redraws: AtomicUsize::new(0),
    });
    registry.register(home.clone());
    registry.register(profile.clone());
    registry.register(home.clone()); // already registered, no effect

    println!("   Registered: {} observers", registry.len());

    // -------------------------------------------------------------------------
    // 2. Notify
    // -------------------------------------------------------------------------
    println!("\n2. Notifying...");

    let report = registry.notify();
    println!("   Delivered to {} of {}", report.delivered(), report.observers);

    // -------------------------------------------------------------------------
    // 3. Unregister and notify again
    // -------------------------------------------------------------------------
    println!("\n3. Unregistering 'home'...");

    registry.unregister(&home);
    let _ = registry.notify();

    // -------------------------------------------------------------------------
    // 4. A failing observer does not stop the others
    // -------------------------------------------------------------------------
    println!("\n4. Registering a failing observer...");

    registry.register(observer_fn(|| panic!("lost connection")));
    let report = registry.notify();
    for failure in &report.failures {
        println!("   {failure}");
    }
    println!(
        "   'profile' still redrawn: {} times",
        profile.redraws.load(Ordering::SeqCst)
    );

    println!("\n=== Done ===");
}
