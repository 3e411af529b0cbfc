use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::IssueType;

/// Points removed per issue, and the most a single category may remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRule {
    pub per_issue: u32,
    pub cap: u32,
}

impl DeductionRule {
    pub const fn new(per_issue: u32, cap: u32) -> Self {
        Self { per_issue, cap }
    }

    pub fn apply(&self, count: usize) -> u32 {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        count.saturating_mul(self.per_issue).min(self.cap)
    }

    /// Built-in rubric for each issue category.
    pub const fn standard(issue_type: IssueType) -> Self {
        match issue_type {
            IssueType::ComplexFormatting => Self::new(5, 15),
            IssueType::MissingDates => Self::new(10, 30),
            IssueType::NonstandardHeaders => Self::new(2, 6),
            IssueType::TableLayouts => Self::new(6, 6),
            IssueType::ContactFormat => Self::new(5, 5),
            IssueType::MissingKeywords => Self::new(7, 7),
            IssueType::IncompatibleFileFormat => Self::new(10, 10),
            IssueType::FileSizeLarge => Self::new(1, 1),
        }
    }
}

/// Rubric configuration for the compatibility score and its thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub deductions: BTreeMap<IssueType, DeductionRule>,
    pub passing_score: u8,
    pub max_file_bytes: u64,
    pub max_docx_bytes: u64,
    pub keyword_relevance_floor: f32,
}

impl ScoringConfig {
    /// Categories missing from `deductions` fall back to the standard rubric.
    pub fn rule(&self, issue_type: IssueType) -> DeductionRule {
        self.deductions
            .get(&issue_type)
            .copied()
            .unwrap_or_else(|| DeductionRule::standard(issue_type))
    }

    pub fn with_passing_score(mut self, passing_score: u8) -> Self {
        self.passing_score = passing_score.min(100);
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            deductions: IssueType::ALL
                .into_iter()
                .map(|issue_type| (issue_type, DeductionRule::standard(issue_type)))
                .collect(),
            passing_score: 60,
            max_file_bytes: 2 * 1024 * 1024,
            max_docx_bytes: 1024 * 1024,
            keyword_relevance_floor: 0.5,
        }
    }
}
