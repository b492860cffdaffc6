// ── Scorer seam ──
//
// The orchestrator talks to the scoring service only through this trait,
// so it can be driven by a scripted fake in tests.

use std::future::Future;

use passmeter_api::ScoringClient;

use crate::error::CoreError;
use crate::model::AnalysisResult;

/// Remote scoring capability used by the validation orchestrator.
pub trait Scorer: Send + Sync + 'static {
    /// Read-only scoring. Drives the visible result.
    fn analyze(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;

    /// Scoring that also persists the record server-side.
    fn capture(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;
}

impl Scorer for ScoringClient {
    async fn analyze(&self, password: &str) -> Result<AnalysisResult, CoreError> {
        Ok(ScoringClient::analyze(self, password).await?.into())
    }

    async fn capture(&self, password: &str) -> Result<AnalysisResult, CoreError> {
        Ok(ScoringClient::capture(self, password).await?.into())
    }
}
