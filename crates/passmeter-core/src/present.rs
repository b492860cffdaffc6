//! Pure mappers from an [`AnalysisResult`] to what a renderer draws.
//!
//! Strength comes straight from the service. Entropy classification and
//! the check label table are owned here.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::model::{AnalysisResult, MAX_SCORE};

// ── Checks ──────────────────────────────────────────────────────────

/// Every check the renderer knows how to label, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    LengthOk,
    LengthGreat,
    HasUppercase,
    HasLowercase,
    HasDigit,
    HasSpecial,
    NotCommon,
    NoRepeatedChars,
    NoSequentialChars,
    NoKeyboardPattern,
}

impl CheckId {
    /// Wire identifier, e.g. `"has_digit"`.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LengthOk => "At least 12 characters",
            Self::LengthGreat => "16 or more characters (ideal)",
            Self::HasUppercase => "Uppercase letters (A-Z)",
            Self::HasLowercase => "Lowercase letters (a-z)",
            Self::HasDigit => "Digits (0-9)",
            Self::HasSpecial => "Special characters (!@#$...)",
            Self::NotCommon => "Not a common password",
            Self::NoRepeatedChars => "No excessive repetition (aaa, 111)",
            Self::NoSequentialChars => "No obvious sequences (abc, 123)",
            Self::NoKeyboardPattern => "No keyboard patterns (qwerty)",
        }
    }
}

/// One labeled line of the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRow {
    pub id: CheckId,
    pub label: &'static str,
    pub passed: bool,
}

/// Rows for every known check present in `checks`, in table order.
/// Unknown identifiers are skipped.
pub fn check_rows(checks: &BTreeMap<String, bool>) -> Vec<CheckRow> {
    CheckId::iter()
        .filter_map(|id| {
            checks.get(id.as_str()).map(|&passed| CheckRow {
                id,
                label: id.label(),
                passed,
            })
        })
        .collect()
}

// ── Entropy ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyLevel {
    VeryLow,
    Low,
    Reasonable,
    High,
    VeryHigh,
}

impl EntropyLevel {
    pub fn classify(bits: f64) -> Self {
        if bits.is_nan() || bits < 28.0 {
            Self::VeryLow
        } else if bits < 36.0 {
            Self::Low
        } else if bits < 50.0 {
            Self::Reasonable
        } else if bits < 70.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Reasonable => "reasonable",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }

    /// `#rrggbb` color for this level.
    pub fn color_token(self) -> &'static str {
        match self {
            Self::VeryLow => "#ef4444",
            Self::Low => "#f97316",
            Self::Reasonable => "#eab308",
            Self::High => "#22c55e",
            Self::VeryHigh => "#06b6d4",
        }
    }
}

/// Gauge fill in percent: one point per bit, capped at 100.
pub fn entropy_fill_percent(bits: f64) -> f64 {
    if bits.is_nan() {
        return 0.0;
    }
    bits.clamp(0.0, 100.0)
}

// ── Strength ────────────────────────────────────────────────────────

/// Number of segments in the strength meter.
pub const METER_SEGMENTS: usize = 5;

/// Strength meter as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthMeter {
    pub score: u8,
    pub label: String,
    pub color: String,
}

impl StrengthMeter {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            score: result.score.min(MAX_SCORE),
            label: result.strength_label.clone(),
            color: result.strength_color.clone(),
        }
    }

    /// Fill state of each of the five segments.
    pub fn segments(&self) -> [bool; METER_SEGMENTS] {
        std::array::from_fn(|i| i < usize::from(self.score))
    }

    /// Five-star rendering, e.g. `★★★☆☆`.
    pub fn stars(&self) -> String {
        self.segments()
            .iter()
            .map(|&filled| if filled { '★' } else { '☆' })
            .collect()
    }
}

/// Parse a `#rrggbb` token. Anything else yields `None`.
pub fn parse_color_token(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
