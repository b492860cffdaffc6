//! `analyze` and `capture` command handlers.

use std::fmt::Write as _;

use secrecy::ExposeSecret;
use serde::Serialize;

use passmeter_core::present::check_rows;
use passmeter_core::{AnalysisResult, EntropyLevel, Scorer, ScoringClient, StrengthMeter};

use crate::cli::{GlobalOpts, PasswordArgs};
use crate::commands::util;
use crate::error::CliError;
use crate::output::{self, Painter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read-only scoring.
    Analyze,
    /// Scoring that is recorded server-side.
    Capture,
}

/// What `--output json|yaml` emits: the service result plus the
/// client-side entropy classification.
#[derive(Debug, Serialize)]
struct AnalysisReport<'a> {
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
    entropy_level: EntropyLevel,
    recorded: bool,
}

pub async fn handle(
    client: &ScoringClient,
    args: PasswordArgs,
    mode: Mode,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = util::read_password(args)?;
    let secret = password.expose_secret();
    tracing::debug!(?mode, len = secret.len(), "scoring password");

    let analysis = match mode {
        Mode::Analyze => Scorer::analyze(client, secret).await?,
        Mode::Capture => Scorer::capture(client, secret).await?,
    };

    let report = AnalysisReport {
        entropy_level: EntropyLevel::classify(analysis.entropy_bits),
        analysis: &analysis,
        recorded: mode == Mode::Capture,
    };
    let painter = Painter::new(&global.color);
    let out = output::render_single(&global.output, &report, |r| render_report(r, painter))?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_report(report: &AnalysisReport<'_>, painter: Painter) -> String {
    let analysis = report.analysis;
    let meter = StrengthMeter::from_result(analysis);
    let level = report.entropy_level;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}  {}  ({}/5)",
        painter.hex(&meter.color, &meter.stars()),
        painter.hex(&meter.color, &meter.label),
        meter.score
    );
    let _ = writeln!(
        out,
        "Entropy  {:.1} bits, {}",
        analysis.entropy_bits,
        painter.hex(level.color_token(), level.label())
    );
    if analysis.is_common {
        let _ = writeln!(
            out,
            "{}",
            painter.fail("This password appears in common-password lists.")
        );
    }

    let rows = check_rows(&analysis.checks);
    if !rows.is_empty() {
        let _ = writeln!(out, "\n{}", painter.heading("Checks"));
        for row in rows {
            let mark = if row.passed {
                painter.pass("✓")
            } else {
                painter.fail("✗")
            };
            let _ = writeln!(out, "  {mark} {}", row.label);
        }
    }

    if !analysis.tips.is_empty() {
        let _ = writeln!(out, "\n{}", painter.heading("Tips"));
        for tip in &analysis.tips {
            let _ = writeln!(out, "  • {tip}");
        }
    }

    if !analysis.positive_feedbacks.is_empty() {
        let _ = writeln!(out, "\n{}", painter.heading("Strengths"));
        for note in &analysis.positive_feedbacks {
            let _ = writeln!(out, "  • {note}");
        }
    }

    if report.recorded {
        let _ = writeln!(out, "\nRecorded in service statistics.");
    }

    out.trim_end().to_owned()
}
