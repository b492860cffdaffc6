//! Dual-cadence validation orchestrator.
//!
//! One text input drives two independent debounced paths:
//!
//! - **analyze** (fast, 400 ms by default) updates the visible
//!   [`OrchestratorState`]. Every fired request gets a sequence number;
//!   a response is applied only if its number is still the latest.
//! - **capture** (slow, 3000 ms by default) records the password
//!   server-side. Its outcome is logged and otherwise ignored.
//!
//! State is published on a [`tokio::sync::watch`] channel. After
//! [`shutdown`](ValidationOrchestrator::shutdown) (or drop) no timer fires
//! and no in-flight response touches the state. A capture request already
//! sent is left to finish.
//!
//! Timer callbacks may run on another worker thread while the owner clears
//! the input or shuts down. Every liveness check therefore happens inside
//! the watch sender's lock, next to the write it guards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::error::CoreError;
use crate::scorer::Scorer;
use crate::state::OrchestratorState;

/// Debounce delays for the two paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub analyze_delay: Duration,
    pub capture_delay: Duration,
}

impl OrchestratorConfig {
    pub const DEFAULT_ANALYZE_DELAY: Duration = Duration::from_millis(400);
    pub const DEFAULT_CAPTURE_DELAY: Duration = Duration::from_millis(3_000);
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            analyze_delay: Self::DEFAULT_ANALYZE_DELAY,
            capture_delay: Self::DEFAULT_CAPTURE_DELAY,
        }
    }
}

/// Shared between the orchestrator handle, both timer callbacks, and
/// every in-flight request task.
struct Inner<S> {
    scorer: Arc<S>,
    state: watch::Sender<OrchestratorState>,
    latest_seq: AtomicU64,
    cancel: CancellationToken,
}

/// Binds a text input to debounced analyze/capture requests.
///
/// Must be created and driven inside a tokio runtime.
pub struct ValidationOrchestrator<S: Scorer> {
    inner: Arc<Inner<S>>,
    analyze: Debouncer<String>,
    capture: Debouncer<String>,
}

impl<S: Scorer> ValidationOrchestrator<S> {
    pub fn new(scorer: Arc<S>, config: OrchestratorConfig) -> Self {
        let (state, _) = watch::channel(OrchestratorState::default());
        let inner = Arc::new(Inner {
            scorer,
            state,
            latest_seq: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        });

        let fast = Arc::clone(&inner);
        let analyze = Debouncer::new(config.analyze_delay, move |text: String| {
            fire_analyze(&fast, text);
        });

        let slow = Arc::clone(&inner);
        let capture = Debouncer::new(config.capture_delay, move |text: String| {
            fire_capture(&slow, text);
        });

        debug!(
            analyze_ms = config.analyze_delay.as_millis(),
            capture_ms = config.capture_delay.as_millis(),
            "validation orchestrator created"
        );

        Self {
            inner,
            analyze,
            capture,
        }
    }

    /// Feed the current input text.
    ///
    /// Empty text clears the state immediately, disarms both timers, and
    /// invalidates any analysis already in flight. Anything else re-arms
    /// both timers with the new text. Ignored after shutdown.
    pub fn on_input_change(&mut self, text: impl Into<String>) {
        if self.is_shut_down() {
            return;
        }
        let text = text.into();

        if text.is_empty() {
            self.analyze.cancel();
            self.capture.cancel();
            let inner = &self.inner;
            inner.state.send_modify(|state| {
                inner.latest_seq.fetch_add(1, Ordering::SeqCst);
                state.input_cleared();
            });
            debug!("input cleared");
            return;
        }

        self.inner
            .state
            .send_if_modified(|state| {
                if state.raw_input == text {
                    return false;
                }
                state.input_changed(text.clone());
                true
            });
        self.analyze.trigger(text.clone());
        self.capture.trigger(text);
    }

    /// Clear the current error message, keeping everything else.
    pub fn dismiss_error(&self) {
        let inner = &self.inner;
        inner.state.send_if_modified(|state| {
            if inner.cancel.is_cancelled() || state.error.is_none() {
                return false;
            }
            state.error_dismissed();
            true
        });
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<OrchestratorState> {
        self.inner.state.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> OrchestratorState {
        self.inner.state.borrow().clone()
    }

    /// Disarm both timers and abandon in-flight analysis. Idempotent.
    pub fn shutdown(&mut self) {
        let inner = &self.inner;
        let mut first = false;
        // Taken under the watch lock so no timer callback is mid-write.
        inner.state.send_if_modified(|_| {
            first = !inner.cancel.is_cancelled();
            inner.cancel.cancel();
            false
        });
        if first {
            debug!("validation orchestrator shutting down");
        }
        self.analyze.cancel();
        self.capture.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}

impl<S: Scorer> Drop for ValidationOrchestrator<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: Scorer> std::fmt::Debug for ValidationOrchestrator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationOrchestrator")
            .field("analyze", &self.analyze)
            .field("capture", &self.capture)
            .field("shut_down", &self.is_shut_down())
            .finish_non_exhaustive()
    }
}

// ── Timer callbacks ─────────────────────────────────────────────────

/// Starts a request only if the orchestrator is alive and `text` is still
/// the input. A clear or shutdown that wins the lock first makes this a
/// no-op; one that loses bumps the sequence number past ours.
fn fire_analyze<S: Scorer>(inner: &Arc<Inner<S>>, text: String) {
    let mut started = None;
    inner.state.send_if_modified(|state| {
        if inner.cancel.is_cancelled() || state.raw_input != text {
            return false;
        }
        started = Some(inner.latest_seq.fetch_add(1, Ordering::SeqCst) + 1);
        state.request_started();
        true
    });
    let Some(seq) = started else {
        debug!(len = text.len(), "analyze skipped, input moved on");
        return;
    };
    debug!(seq, len = text.len(), "analyze fired");

    let inner = Arc::clone(inner);
    tokio::spawn(async move {
        let outcome = tokio::select! {
            biased;
            () = inner.cancel.cancelled() => return,
            outcome = inner.scorer.analyze(&text) => outcome,
        };
        apply_analysis(&inner, seq, outcome);
    });
}

/// Apply a response only if the orchestrator is alive and `seq` is
/// still the latest issued number. The check runs under the watch
/// lock so it cannot interleave with a newer request starting.
fn apply_analysis<S: Scorer>(
    inner: &Inner<S>,
    seq: u64,
    outcome: Result<crate::model::AnalysisResult, CoreError>,
) {
    let mut outcome = Some(outcome);
    let applied = inner.state.send_if_modified(|state| {
        if inner.cancel.is_cancelled() || inner.latest_seq.load(Ordering::SeqCst) != seq {
            return false;
        }
        match outcome.take() {
            Some(Ok(result)) => state.request_succeeded(Arc::new(result)),
            Some(Err(err)) => {
                warn!(seq, error = %err, "analysis failed");
                state.request_failed(CoreError::CONNECTIVITY_MESSAGE.to_owned());
            }
            None => return false,
        }
        true
    });

    if !applied {
        debug!(seq, "discarded stale analysis");
    }
}

fn fire_capture<S: Scorer>(inner: &Arc<Inner<S>>, text: String) {
    if inner.cancel.is_cancelled() {
        return;
    }
    debug!(len = text.len(), "capture fired");

    // Runs to completion even after shutdown.
    let scorer = Arc::clone(&inner.scorer);
    tokio::spawn(async move {
        match scorer.capture(&text).await {
            Ok(result) => debug!(score = result.score, "capture recorded"),
            Err(err) => debug!(error = %err, "capture failed, ignored"),
        }
    });
}
