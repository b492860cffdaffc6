// ── Orchestrator state ──
//
// The visible state of one validator instance. Only the transition
// methods below mutate it, and only the orchestrator calls them.

use std::sync::Arc;

use crate::model::AnalysisResult;

/// Snapshot of what the validator UI should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrchestratorState {
    /// Current text of the input.
    pub raw_input: String,
    /// Last successful analysis. Survives failures and in-flight requests.
    pub result: Option<Arc<AnalysisResult>>,
    /// An analyze request is in flight.
    pub loading: bool,
    /// User-facing failure message from the latest analyze attempt.
    pub error: Option<String>,
}

impl OrchestratorState {
    /// Nothing typed and nothing to show.
    pub fn is_idle(&self) -> bool {
        self.raw_input.is_empty() && self.result.is_none()
    }

    // ── Transitions ──────────────────────────────────────────────────

    pub(crate) fn input_changed(&mut self, text: String) {
        self.raw_input = text;
    }

    /// Empty input: explicit "no analysis" state.
    pub(crate) fn input_cleared(&mut self) {
        self.raw_input.clear();
        self.result = None;
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn request_started(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn request_succeeded(&mut self, result: Arc<AnalysisResult>) {
        self.loading = false;
        self.result = Some(result);
    }

    /// Keeps `result` untouched so a transient failure never erases a
    /// valid display.
    pub(crate) fn request_failed(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub(crate) fn error_dismissed(&mut self) {
        self.error = None;
    }
}
