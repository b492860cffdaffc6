//! Trailing-edge debounce.
//!
//! A [`Debouncer`] owns at most one armed timer. Every
//! [`trigger`](Debouncer::trigger) replaces the pending invocation, so a
//! burst of calls collapses into a single callback with the newest
//! arguments once the input has been quiet for the full delay.
//!
//! Timers are tokio tasks; a runtime must be current when triggering.
//! The callback is synchronous, so once it starts it runs to completion
//! and cannot be cut off by a later trigger or cancel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Delays a callback until `delay` has elapsed without another trigger.
pub struct Debouncer<A> {
    delay: Duration,
    callback: Callback<A>,
    pending: Option<JoinHandle<()>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Create a debouncer around `callback`. Nothing is armed until the
    /// first [`trigger`](Self::trigger).
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: None,
        }
    }

    /// Record `args` as the latest call and (re)arm the timer.
    ///
    /// Any invocation armed by an earlier trigger is discarded without
    /// running.
    pub fn trigger(&mut self, args: A) {
        self.cancel();

        let callback = Arc::clone(&self.callback);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(args);
        }));
    }
}

impl<A> Debouncer<A> {
    /// Disarm the pending timer, if any, without invoking the callback.
    ///
    /// Returns `true` if an invocation was actually pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let armed = !handle.is_finished();
                handle.abort();
                armed
            }
            None => false,
        }
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}
