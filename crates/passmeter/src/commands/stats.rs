//! Statistics command handler.

use tabled::Tabled;

use passmeter_core::model::MAX_SCORE;
use passmeter_core::{PasswordStats, ScoreBucket, ScoringClient};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Score")]
    score: i64,
    #[tabled(rename = "Meter")]
    meter: String,
    #[tabled(rename = "Passwords")]
    total: u64,
}

impl From<&ScoreBucket> for BucketRow {
    fn from(b: &ScoreBucket) -> Self {
        let filled = usize::try_from(b.score.clamp(0, i64::from(MAX_SCORE))).unwrap_or(0);
        let empty = usize::from(MAX_SCORE) - filled;
        Self {
            score: b.score,
            meter: format!("{}{}", "★".repeat(filled), "☆".repeat(empty)),
            total: b.total,
        }
    }
}

fn render_stats(stats: &PasswordStats, format: &OutputFormat) -> Result<String, CliError> {
    output::render_single(format, stats, |s| {
        let mut buckets = s.score_distribution.clone();
        buckets.sort_by_key(|b| b.score);
        let rows: Vec<BucketRow> = buckets.iter().map(BucketRow::from).collect();
        format!(
            "Total analyzed: {}\n{}",
            s.total_analyzed,
            output::render_table(&rows)
        )
    })
}

pub async fn handle(client: &ScoringClient, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = client
        .stats()
        .await
        .map_err(|e| CliError::from(passmeter_core::CoreError::from(e)))?;
    let out = render_stats(&stats, &global.output)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
