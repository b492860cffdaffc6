// ── Result model ──
//
// The typed value the renderer consumes. Built only from a successful
// analyze (or capture) response.

use std::collections::BTreeMap;

use serde::Serialize;

use passmeter_api::PasswordAnalysis;

/// Highest strength tier the meter can display.
pub const MAX_SCORE: u8 = 5;

/// One scoring response, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Strength tier, clamped to `0..=MAX_SCORE`.
    pub score: u8,
    pub strength_label: String,
    pub strength_color: String,
    /// Never negative; non-finite values from the wire become 0.
    pub entropy_bits: f64,
    pub is_common: bool,
    /// Raw check map. Unknown ids stay here; the renderer skips them.
    pub checks: BTreeMap<String, bool>,
    pub tips: Vec<String>,
    pub positive_feedbacks: Vec<String>,
}

impl From<PasswordAnalysis> for AnalysisResult {
    fn from(raw: PasswordAnalysis) -> Self {
        let score = u8::try_from(raw.score.clamp(0, i64::from(MAX_SCORE))).unwrap_or(MAX_SCORE);
        let entropy_bits = if raw.entropy_bits.is_finite() {
            raw.entropy_bits.max(0.0)
        } else {
            0.0
        };

        Self {
            score,
            strength_label: raw.strength_label,
            strength_color: raw.strength_color,
            entropy_bits,
            is_common: raw.is_common,
            checks: raw.checks,
            tips: raw.tips,
            positive_feedbacks: raw.positive_feedbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(score: i64, entropy_bits: f64) -> PasswordAnalysis {
        PasswordAnalysis {
            score,
            strength_label: "Fair".into(),
            strength_color: "#eab308".into(),
            entropy_bits,
            is_common: false,
            checks: BTreeMap::new(),
            tips: vec![],
            positive_feedbacks: vec![],
        }
    }

    #[test]
    fn score_is_clamped_to_meter_range() {
        assert_eq!(AnalysisResult::from(raw(9, 10.0)).score, 5);
        assert_eq!(AnalysisResult::from(raw(-2, 10.0)).score, 0);
        assert_eq!(AnalysisResult::from(raw(3, 10.0)).score, 3);
    }

    #[test]
    fn entropy_is_never_negative_or_nan() {
        assert!(AnalysisResult::from(raw(1, -4.0)).entropy_bits.abs() < f64::EPSILON);
        assert!(AnalysisResult::from(raw(1, f64::NAN)).entropy_bits.abs() < f64::EPSILON);
    }
}
