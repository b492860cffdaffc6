#![allow(clippy::unwrap_used)]
// Timing tests for `ValidationOrchestrator`, run on a paused tokio clock
// against a scripted in-memory scorer.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use passmeter_core::{
    AnalysisResult, CoreError, OrchestratorConfig, OrchestratorState, Scorer,
    ValidationOrchestrator,
};

// ── Fake scorer ─────────────────────────────────────────────────────

#[derive(Default)]
struct FakeScorer {
    analyze_calls: Mutex<Vec<String>>,
    capture_calls: Mutex<Vec<String>>,
    captures_finished: Mutex<Vec<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    fail_analyze: AtomicBool,
    fail_capture: AtomicBool,
}

impl FakeScorer {
    fn delay(&self, password: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(password.to_owned(), delay);
    }

    fn analyzed(&self) -> Vec<String> {
        self.analyze_calls.lock().unwrap().clone()
    }

    fn captured(&self) -> Vec<String> {
        self.capture_calls.lock().unwrap().clone()
    }

    fn captures_finished(&self) -> Vec<String> {
        self.captures_finished.lock().unwrap().clone()
    }

    async fn respond(&self, password: &str, fail: bool) -> Result<AnalysisResult, CoreError> {
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get(password)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(delay).await;
        if fail {
            return Err(CoreError::ConnectionFailed {
                url: "http://localhost:8000/api/password/analyze".into(),
                reason: "connection refused".into(),
            });
        }
        Ok(result_labeled(password))
    }
}

impl Scorer for FakeScorer {
    async fn analyze(&self, password: &str) -> Result<AnalysisResult, CoreError> {
        self.analyze_calls.lock().unwrap().push(password.to_owned());
        let fail = self.fail_analyze.load(Ordering::SeqCst);
        self.respond(password, fail).await
    }

    async fn capture(&self, password: &str) -> Result<AnalysisResult, CoreError> {
        self.capture_calls.lock().unwrap().push(password.to_owned());
        let fail = self.fail_capture.load(Ordering::SeqCst);
        let outcome = self.respond(password, fail).await.map(|mut r| {
            r.strength_label = format!("captured:{password}");
            r
        });
        self.captures_finished
            .lock()
            .unwrap()
            .push(password.to_owned());
        outcome
    }
}

/// A result whose label names the password it was computed for, so tests
/// can tell which response was applied.
fn result_labeled(password: &str) -> AnalysisResult {
    AnalysisResult {
        score: 2,
        strength_label: password.to_owned(),
        strength_color: "#f97316".into(),
        entropy_bits: 30.0,
        is_common: false,
        checks: BTreeMap::from([("length_ok".to_string(), false)]),
        tips: vec!["Use at least 12 characters.".into()],
        positive_feedbacks: vec![],
    }
}

fn setup() -> (Arc<FakeScorer>, ValidationOrchestrator<FakeScorer>) {
    let scorer = Arc::new(FakeScorer::default());
    let orchestrator = ValidationOrchestrator::new(Arc::clone(&scorer), OrchestratorConfig::default());
    (scorer, orchestrator)
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn shown_label(state: &OrchestratorState) -> Option<String> {
    state.result.as_ref().map(|r| r.strength_label.clone())
}

// ── Debounce cadence ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn rapid_typing_collapses_into_one_request_per_path() {
    let (scorer, mut orchestrator) = setup();

    for text in ["p", "pa", "pas", "pass"] {
        orchestrator.on_input_change(text);
        advance(100).await;
    }
    assert!(scorer.analyzed().is_empty());

    advance(500).await;
    assert_eq!(scorer.analyzed(), vec!["pass".to_string()]);
    assert!(scorer.captured().is_empty());
    assert_eq!(shown_label(&orchestrator.state()), Some("pass".into()));

    advance(3_000).await;
    assert_eq!(scorer.captured(), vec!["pass".to_string()]);
    assert_eq!(scorer.analyzed().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn steady_typing_analyzes_every_pause_but_captures_once() {
    let (scorer, mut orchestrator) = setup();

    let texts: Vec<String> = (1..=5).map(|n| "x".repeat(n)).collect();
    for text in &texts {
        orchestrator.on_input_change(text.as_str());
        advance(1_000).await;
    }
    assert_eq!(scorer.analyzed(), texts);
    assert!(scorer.captured().is_empty());

    advance(3_100).await;
    assert_eq!(scorer.captured(), vec!["xxxxx".to_string()]);
    assert_eq!(scorer.analyzed().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn loading_is_visible_while_request_is_in_flight() {
    let (scorer, mut orchestrator) = setup();
    scorer.delay("secret", Duration::from_millis(200));

    orchestrator.on_input_change("secret");
    advance(450).await;
    let state = orchestrator.state();
    assert!(state.loading);
    assert!(state.result.is_none());
    assert_eq!(state.raw_input, "secret");

    advance(200).await;
    let state = orchestrator.state();
    assert!(!state.loading);
    assert_eq!(shown_label(&state), Some("secret".into()));
}

// ── Empty input ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn clearing_input_resets_state_and_disarms_timers() {
    let (scorer, mut orchestrator) = setup();

    orchestrator.on_input_change("abc");
    advance(500).await;
    assert!(orchestrator.state().result.is_some());

    orchestrator.on_input_change("");
    assert_eq!(orchestrator.state(), OrchestratorState::default());

    advance(5_000).await;
    assert_eq!(scorer.analyzed(), vec!["abc".to_string()]);
    assert!(scorer.captured().is_empty());
    assert_eq!(orchestrator.state(), OrchestratorState::default());
}

#[tokio::test(start_paused = true)]
async fn clearing_input_discards_analysis_in_flight() {
    let (scorer, mut orchestrator) = setup();
    scorer.delay("abc", Duration::from_millis(1_000));

    orchestrator.on_input_change("abc");
    advance(450).await;
    assert!(orchestrator.state().loading);

    orchestrator.on_input_change("");
    advance(2_000).await;
    assert_eq!(orchestrator.state(), OrchestratorState::default());
}

// ── Ordering ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn late_response_for_older_text_is_discarded() {
    let (scorer, mut orchestrator) = setup();
    scorer.delay("slow", Duration::from_millis(1_000));
    scorer.delay("fast", Duration::from_millis(10));

    orchestrator.on_input_change("slow");
    advance(450).await;
    orchestrator.on_input_change("fast");
    advance(450).await;

    assert_eq!(shown_label(&orchestrator.state()), Some("fast".into()));

    advance(1_000).await;
    let state = orchestrator.state();
    assert_eq!(shown_label(&state), Some("fast".into()));
    assert!(!state.loading);
    assert_eq!(scorer.analyzed(), vec!["slow".to_string(), "fast".to_string()]);
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn analyze_failure_keeps_previous_result() {
    let (scorer, mut orchestrator) = setup();

    orchestrator.on_input_change("good");
    advance(500).await;
    assert_eq!(shown_label(&orchestrator.state()), Some("good".into()));

    scorer.fail_analyze.store(true, Ordering::SeqCst);
    orchestrator.on_input_change("goodbye");
    advance(500).await;

    let state = orchestrator.state();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(CoreError::CONNECTIVITY_MESSAGE));
    assert_eq!(shown_label(&state), Some("good".into()));

    orchestrator.dismiss_error();
    let state = orchestrator.state();
    assert!(state.error.is_none());
    assert_eq!(shown_label(&state), Some("good".into()));
}

#[tokio::test(start_paused = true)]
async fn next_request_clears_previous_error() {
    let (scorer, mut orchestrator) = setup();
    scorer.fail_analyze.store(true, Ordering::SeqCst);

    orchestrator.on_input_change("one");
    advance(500).await;
    assert!(orchestrator.state().error.is_some());

    scorer.fail_analyze.store(false, Ordering::SeqCst);
    orchestrator.on_input_change("two");
    advance(500).await;
    let state = orchestrator.state();
    assert!(state.error.is_none());
    assert_eq!(shown_label(&state), Some("two".into()));
}

#[tokio::test(start_paused = true)]
async fn capture_outcome_never_reaches_state() {
    let (scorer, mut orchestrator) = setup();

    orchestrator.on_input_change("quiet");
    advance(3_500).await;
    assert_eq!(scorer.captured(), vec!["quiet".to_string()]);
    let state = orchestrator.state();
    assert_eq!(shown_label(&state), Some("quiet".into()));
    assert!(state.error.is_none());

    scorer.fail_capture.store(true, Ordering::SeqCst);
    orchestrator.on_input_change("quieter");
    advance(3_500).await;
    assert_eq!(scorer.captured().len(), 2);
    let state = orchestrator.state();
    assert_eq!(shown_label(&state), Some("quieter".into()));
    assert!(state.error.is_none());
    assert!(!state.loading);
}

// ── Teardown ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn shutdown_disarms_pending_timers() {
    let (scorer, mut orchestrator) = setup();

    orchestrator.on_input_change("abc");
    advance(100).await;
    orchestrator.shutdown();
    orchestrator.shutdown();
    assert!(orchestrator.is_shut_down());

    advance(5_000).await;
    assert!(scorer.analyzed().is_empty());
    assert!(scorer.captured().is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_freezes_state_despite_in_flight_response() {
    let (scorer, mut orchestrator) = setup();
    scorer.delay("abc", Duration::from_millis(1_000));
    let rx = orchestrator.subscribe();

    orchestrator.on_input_change("abc");
    advance(450).await;
    orchestrator.shutdown();
    let frozen = orchestrator.state();

    advance(5_000).await;
    assert_eq!(orchestrator.state(), frozen);
    assert_eq!(*rx.borrow(), frozen);
    assert!(scorer.captured().is_empty());

    orchestrator.on_input_change("ignored");
    orchestrator.dismiss_error();
    advance(5_000).await;
    assert_eq!(orchestrator.state(), frozen);
    assert_eq!(scorer.analyzed(), vec!["abc".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn capture_already_sent_finishes_after_shutdown() {
    let (scorer, mut orchestrator) = setup();
    scorer.delay("keep", Duration::from_millis(1_000));

    orchestrator.on_input_change("keep");
    advance(3_100).await;
    assert_eq!(scorer.captured(), vec!["keep".to_string()]);
    assert!(scorer.captures_finished().is_empty());

    orchestrator.shutdown();
    let frozen = orchestrator.state();

    advance(2_000).await;
    assert_eq!(scorer.captures_finished(), vec!["keep".to_string()]);
    assert_eq!(orchestrator.state(), frozen);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_orchestrator_tears_it_down() {
    let (scorer, mut orchestrator) = setup();
    let rx = orchestrator.subscribe();

    orchestrator.on_input_change("abc");
    drop(orchestrator);

    advance(5_000).await;
    assert!(scorer.analyzed().is_empty());
    assert!(scorer.captured().is_empty());
    assert_eq!(rx.borrow().raw_input, "abc");
}

// ── Observation ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn subscribers_see_each_transition() {
    let (_scorer, mut orchestrator) = setup();
    let mut rx = orchestrator.subscribe();

    orchestrator.on_input_change("watch");
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().raw_input, "watch");

    advance(500).await;
    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(shown_label(&state), Some("watch".into()));
}

// ── Cross-thread timing ─────────────────────────────────────────────
//
// Real clock on a multi-threaded runtime: the analyze timer fires on a
// worker thread while this task clears the input or shuts down.

const RACE_ROUNDS: usize = 300;

fn one_ms_analyze() -> OrchestratorConfig {
    OrchestratorConfig {
        analyze_delay: Duration::from_millis(1),
        capture_delay: Duration::from_secs(3_600),
    }
}

fn instant_scorer() -> Arc<FakeScorer> {
    let scorer = Arc::new(FakeScorer::default());
    scorer.delay("a", Duration::ZERO);
    scorer
}

/// Busy-wait so the timer deadline passes while this thread stays busy.
fn spin(duration: Duration) {
    let start = std::time::Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn clearing_at_the_analyze_deadline_never_leaves_a_result() {
    for _ in 0..RACE_ROUNDS {
        let scorer = instant_scorer();
        let mut orchestrator = ValidationOrchestrator::new(Arc::clone(&scorer), one_ms_analyze());

        orchestrator.on_input_change("a");
        spin(Duration::from_millis(1));
        orchestrator.on_input_change("");

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(orchestrator.state(), OrchestratorState::default());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shutdown_at_the_analyze_deadline_freezes_state() {
    for _ in 0..RACE_ROUNDS {
        let scorer = instant_scorer();
        let mut orchestrator = ValidationOrchestrator::new(Arc::clone(&scorer), one_ms_analyze());

        orchestrator.on_input_change("a");
        spin(Duration::from_millis(1));
        orchestrator.shutdown();
        let frozen = orchestrator.state();

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(orchestrator.state(), frozen);
    }
}
