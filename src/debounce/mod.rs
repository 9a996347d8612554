//! Trailing-edge debouncer for search input.
//!
//! Each [`Debouncer::call`] schedules its action after the quiet period and
//! aborts whatever was scheduled before it, so only the last input of a burst
//! runs. Must be used inside a tokio runtime.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default quiet period between keystrokes.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Cancellable timer that runs only the most recently scheduled action.
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Run `action` after the quiet period unless another call supersedes it.
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let quiet = self.quiet;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action();
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop the scheduled action, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// Is an action scheduled and not yet finished?
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
