//! Background notification loop with cooperative cancellation.
//!
//! A [`Notifier`] owns one named OS thread that calls `notify()` on a registry
//! once per interval. Stopping is cooperative: [`Notifier::stop`] raises a flag
//! and wakes the worker, which exits before its next round. The worker is never
//! killed from outside, so a notification round in progress always completes.
//!
//! ```text
//!   spawn ──► [wait interval | stop?] ──► registry.notify() ──┐
//!                   ▲                                         │
//!                   └─────────────────────────────────────────┘
//!   stop  ──► raise flag + wake ──► worker exits ──► join ──► NotifierStats
//! ```

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{NotifierError, ObservableApi};

/// Configuration for a [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Delay between two notification rounds. Must be non-zero.
    pub interval: Duration,
    /// Name given to the worker thread.
    pub thread_name: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            thread_name: "observer-notifier".to_string(),
        }
    }
}

impl NotifierConfig {
    /// Sets the delay between rounds.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

/// Counters returned when a notifier is stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifierStats {
    /// Number of completed `notify()` rounds.
    pub ticks: u64,
    /// Total observer callback failures across all rounds.
    pub failures: u64,
}

/// Stop flag the worker checks between rounds.
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    fn new() -> Self {
        Self {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    fn stop(&self) {
        *self.stopped.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.wake.notify_all();
    }

    /// Sleeps up to `timeout`; returns `true` once a stop was requested.
    fn wait(&self, timeout: Duration) -> bool {
        let guard = self.stopped.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = self
            .wake
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Handle to a running background notification loop.
///
/// Dropping the handle stops the worker and waits for it.
///
/// # Examples
///
/// ```
/// use observer_registry::{observer_fn, Notifier, NotifierConfig, ObservableApi, ObserverRegistry};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let registry = Arc::new(ObserverRegistry::named("ticker"));
/// registry.register(observer_fn(|| {}));
///
/// let notifier = Notifier::spawn(
///     registry.clone(),
///     NotifierConfig::default().with_interval(Duration::from_millis(5)),
/// )
/// .unwrap();
///
/// std::thread::sleep(Duration::from_millis(20));
/// let stats = notifier.stop().unwrap();
/// assert_eq!(stats.failures, 0);
/// ```
pub struct Notifier {
    name: String,
    signal: Arc<StopSignal>,
    worker: Option<JoinHandle<NotifierStats>>,
}

impl Notifier {
    /// Starts a worker thread calling `registry.notify()` every `config.interval`.
    ///
    /// The first round runs one interval after the spawn.
    ///
    /// # Errors
    ///
    /// - [`NotifierError::InvalidInterval`] if the interval is zero
    /// - [`NotifierError::Spawn`] if the OS refuses to create the thread
    pub fn spawn<R>(registry: Arc<R>, config: NotifierConfig) -> Result<Self, NotifierError>
    where
        R: ObservableApi + Send + Sync + 'static,
    {
        if config.interval.is_zero() {
            return Err(NotifierError::InvalidInterval);
        }

        let signal = Arc::new(StopSignal::new());
        let worker_signal = Arc::clone(&signal);
        let interval = config.interval;

        let worker = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || run(registry.as_ref(), &worker_signal, interval))?;

        tracing::info!(notifier = %config.thread_name, ?interval, "notifier started");

        Ok(Self {
            name: config.thread_name,
            signal,
            worker: Some(worker),
        })
    }

    /// `true` while the worker thread is alive.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Requests a stop, waits for the worker and returns its counters.
    ///
    /// # Errors
    ///
    /// Returns [`NotifierError::WorkerPanicked`] if the worker thread died by panic.
    pub fn stop(mut self) -> Result<NotifierStats, NotifierError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<NotifierStats, NotifierError> {
        self.signal.stop();

        let Some(worker) = self.worker.take() else {
            return Ok(NotifierStats::default());
        };

        let stats = worker.join().map_err(|_| NotifierError::WorkerPanicked)?;
        tracing::info!(
            notifier = %self.name,
            ticks = stats.ticks,
            failures = stats.failures,
            "notifier stopped"
        );
        Ok(stats)
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(notifier = %self.name, error = %err, "notifier ended abnormally");
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}

fn run<R>(registry: &R, signal: &StopSignal, interval: Duration) -> NotifierStats
where
    R: ObservableApi + ?Sized,
{
    let mut stats = NotifierStats::default();

    while !signal.wait(interval) {
        let report = registry.notify();
        stats.ticks += 1;
        stats.failures += report.failures.len() as u64;
    }

    stats
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
