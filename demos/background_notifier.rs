//! Background notifier example for observer-registry.
//!
//! A worker thread notifies a global registry on a fixed interval while the main
//! thread adds and removes observers. The worker is stopped cooperatively.
//!
//! Run with: `RUST_LOG=observer_registry=info cargo run --example background_notifier`

use observer_registry::{define_observer_registry, observer_fn, Notifier, NotifierConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

define_observer_registry!(clock);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "observer_registry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ticks = Arc::new(AtomicUsize::new(0));
    let ticks_clone = ticks.clone();
    let counter = observer_fn(move || {
        ticks_clone.fetch_add(1, Ordering::SeqCst);
    });
    clock::register(counter.clone());

    let notifier = Notifier::spawn(
        Arc::new(clock::API),
        NotifierConfig::default()
            .with_interval(Duration::from_millis(50))
            .with_thread_name("clock-notifier"),
    )?;

    thread::sleep(Duration::from_millis(300));

    // Removal takes effect from the next round on.
    clock::unregister(&counter);
    let seen = ticks.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(200));

    let stats = notifier.stop()?;
    println!(
        "observer saw {} of {} rounds (ticks after removal: {})",
        seen,
        stats.ticks,
        ticks.load(Ordering::SeqCst) - seen
    );

    Ok(())
}
