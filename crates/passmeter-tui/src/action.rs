//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use passmeter_core::{Catalog, OrchestratorState};

use crate::screen::ScreenId;

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data events ───────────────────────────────────────────────
    /// Tool catalog fetched (or fallen back).
    CatalogLoaded(Arc<Catalog>),
    /// New snapshot from the validation orchestrator.
    ValidationUpdated(Arc<OrchestratorState>),
}
