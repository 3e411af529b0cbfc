use serde::{Deserialize, Serialize};

use super::super::analyzer::is_decorative;

/// Banded reading of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    HighlyCompatible,
    Good,
    Moderate,
    Low,
}

impl Recommendation {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Recommendation::HighlyCompatible,
            70..=89 => Recommendation::Good,
            50..=69 => Recommendation::Moderate,
            _ => Recommendation::Low,
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Recommendation::HighlyCompatible => {
                "Highly ATS compatible. Your resume should parse cleanly."
            }
            Recommendation::Good => {
                "Good ATS compatibility. Address the remaining issues to improve parsing."
            }
            Recommendation::Moderate => {
                "Moderate ATS compatibility. Several issues may cause parsing problems."
            }
            Recommendation::Low => {
                "Low ATS compatibility. Significant formatting changes are recommended."
            }
        }
    }
}

/// Share of visible characters an ATS parser is expected to keep, 0..=100.
pub fn parse_rate(text: &str) -> u8 {
    let (total, kept) = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(total, kept), c| {
            (total + 1, kept + usize::from(!is_decorative(c)))
        });

    if total == 0 {
        return 100;
    }

    ((kept as f64 / total as f64) * 100.0).round() as u8
}
