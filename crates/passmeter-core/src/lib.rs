//! Orchestration layer between `passmeter-api` and UI consumers (CLI / TUI).
//!
//! - **[`ValidationOrchestrator`]**: Binds a fast (analyze) and a slow
//!   (capture) [`Debouncer`] to one text input. Only the fast path feeds the
//!   visible [`OrchestratorState`]; the slow path is fire-and-forget.
//!   Out-of-order analyze responses are discarded by sequence number, and
//!   [`shutdown()`](ValidationOrchestrator::shutdown) guarantees nothing
//!   touches state afterwards.
//!
//! - **[`Debouncer`]**: Coalesces bursts of triggers into one callback
//!   invocation with the latest arguments.
//!
//! - **[`Scorer`]**: The seam the orchestrator calls through.
//!   [`ScoringClient`] implements it; tests substitute fakes.
//!
//! - **[`present`]**: Pure mappers from [`AnalysisResult`] fields to visual
//!   classifications (strength meter, entropy level, check labels).
//!
//! - **[`catalog`]**: Tool catalog loading with a fixed local fallback.

pub mod catalog;
pub mod debounce;
pub mod error;
pub mod model;
pub mod present;
pub mod scorer;
pub mod state;
pub mod validator;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::{Catalog, CatalogSource, fallback_catalog, load_catalog};
pub use debounce::Debouncer;
pub use error::CoreError;
pub use model::AnalysisResult;
pub use present::{CheckId, CheckRow, EntropyLevel, StrengthMeter};
pub use scorer::Scorer;
pub use state::OrchestratorState;
pub use validator::{OrchestratorConfig, ValidationOrchestrator};

// Boundary types consumers need without depending on the api crate directly.
pub use passmeter_api::{
    PasswordStats, ScoreBucket, ScoringClient, TlsMode, Tool, TransportConfig,
};
