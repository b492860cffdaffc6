// Wire types for the scoring service.
//
// Decoding is deliberately lenient where the service may evolve: unknown
// fields are ignored, unknown check ids survive in the raw map, and
// missing or null feedback lists decode as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Request body shared by `/password/analyze` and `/password/validate`.
#[derive(Debug, Serialize)]
pub(crate) struct PasswordRequest<'a> {
    pub password: &'a str,
}

/// Scoring response returned by both password endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordAnalysis {
    /// Strength tier assigned by the service. Nominally 0-5; not clamped here.
    pub score: i64,
    pub strength_label: String,
    /// Display color token, usually `#rrggbb`.
    pub strength_color: String,
    pub entropy_bits: f64,
    pub is_common: bool,
    /// Check id → pass/fail. Keyed by string so new server-side checks
    /// never break decoding.
    #[serde(default, deserialize_with = "null_as_default")]
    pub checks: BTreeMap<String, bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tips: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub positive_feedbacks: Vec<String>,
}

/// Aggregate statistics over every captured password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStats {
    #[serde(alias = "total_analisadas")]
    pub total_analyzed: u64,
    #[serde(
        default,
        alias = "distribuicao_scores",
        deserialize_with = "null_as_default"
    )]
    pub score_distribution: Vec<ScoreBucket>,
}

/// Number of captured passwords that landed on one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBucket {
    pub score: i64,
    pub total: u64,
}

/// One entry of the tool catalog (`GET /tools`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub available: bool,
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_tolerates_missing_and_null_lists() {
        let body = json!({
            "score": 2,
            "strength_label": "Weak",
            "strength_color": "#f97316",
            "entropy_bits": 31.2,
            "is_common": false,
            "checks": { "has_digit": true },
            "tips": null
        });
        let parsed: PasswordAnalysis = serde_json::from_value(body).unwrap();
        assert!(parsed.tips.is_empty());
        assert!(parsed.positive_feedbacks.is_empty());
        assert_eq!(parsed.checks.get("has_digit"), Some(&true));
    }

    #[test]
    fn analysis_keeps_unknown_check_ids() {
        let body = json!({
            "score": 5,
            "strength_label": "Very strong",
            "strength_color": "#06b6d4",
            "entropy_bits": 104.9,
            "is_common": false,
            "checks": { "length_ok": true, "no_emoji_runs": false },
            "tips": [],
            "positive_feedbacks": ["Long"],
            "server_version": "2.1"
        });
        let parsed: PasswordAnalysis = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.checks.len(), 2);
        assert_eq!(parsed.checks.get("no_emoji_runs"), Some(&false));
    }

    #[test]
    fn stats_accept_service_field_names() {
        let body = json!({
            "total_analisadas": 12,
            "distribuicao_scores": [{ "score": 1, "total": 4 }, { "score": 4, "total": 8 }]
        });
        let parsed: PasswordStats = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total_analyzed, 12);
        assert_eq!(parsed.score_distribution.len(), 2);
        assert_eq!(parsed.score_distribution[1], ScoreBucket { score: 4, total: 8 });
    }

    #[test]
    fn tool_defaults_optional_fields() {
        let parsed: Tool =
            serde_json::from_value(json!({ "id": "x", "name": "X" })).unwrap();
        assert!(!parsed.available);
        assert!(parsed.route.is_empty());
    }
}
