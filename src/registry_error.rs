//! Failure reporting for notification rounds and the background notifier.
//!
//! Registration and removal never fail. The only per-call failure is an
//! observer whose `on_update` panicked; those are collected into a
//! [`NotifyReport`] rather than aborting the round.

use std::any::Any;
use std::io;

use thiserror::Error;

/// One observer's `on_update` panicked during a notification round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("observer '{observer}' failed: {message}")]
pub struct CallbackFailure {
    /// Name of the failing observer.
    pub observer: String,
    /// Panic payload rendered as text.
    pub message: String,
}

impl CallbackFailure {
    pub(crate) fn from_panic(observer: &str, payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self {
            observer: observer.to_string(),
            message,
        }
    }
}

/// Outcome of a single `notify` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct NotifyReport {
    /// Number of observers in the dispatched snapshot.
    pub observers: usize,
    /// Callbacks that panicked, in dispatch order.
    pub failures: Vec<CallbackFailure>,
}

impl NotifyReport {
    /// Number of callbacks that returned normally.
    pub fn delivered(&self) -> usize {
        self.observers.saturating_sub(self.failures.len())
    }

    /// `true` when every callback in the snapshot returned normally.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the report into a `Result`, for callers that want `?`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::CallbackFailures`] when at least one callback panicked.
    pub fn into_result(self) -> Result<usize, NotifyError> {
        if self.failures.is_empty() {
            Ok(self.observers)
        } else {
            Err(NotifyError::CallbackFailures(self.failures))
        }
    }
}

/// Aggregated callback failures of one notification round.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("{} observer callback(s) failed", .0.len())]
    CallbackFailures(Vec<CallbackFailure>),
}

/// Errors produced by the background [`Notifier`](crate::Notifier).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum NotifierError {
    /// The configured interval was zero.
    #[error("notifier interval must be greater than zero")]
    InvalidInterval,

    /// The OS refused to spawn the worker thread.
    #[error("failed to spawn notifier thread: {0}")]
    Spawn(#[from] io::Error),

    /// The worker thread panicked (e.g. inside a trace callback).
    #[error("notifier worker panicked")]
    WorkerPanicked,
}
