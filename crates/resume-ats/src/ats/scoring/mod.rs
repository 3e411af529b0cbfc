mod config;
mod policy;

pub use config::{DeductionRule, ScoringConfig};
pub use policy::{parse_rate, Recommendation};

use std::collections::{BTreeMap, BTreeSet};

use super::analyzer::{bullet_marker, has_markup, is_decorative, is_table_line, Section};
use super::domain::{Issue, IssueType};

const MAX_SCORE: u32 = 100;
const SHORT_SECTION_WORDS: usize = 10;
const LONG_SECTION_WORDS: usize = 500;

/// Stateless scorer that applies the deduction rubric to analyzer output.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Capped deduction per category present in `issues`.
    pub fn deductions(&self, issues: &[Issue]) -> BTreeMap<IssueType, u32> {
        let mut counts: BTreeMap<IssueType, usize> = BTreeMap::new();
        for issue in issues {
            *counts.entry(issue.issue_type).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|(issue_type, count)| (issue_type, self.config.rule(issue_type).apply(count)))
            .collect()
    }

    pub fn score(&self, issues: &[Issue]) -> u8 {
        let total: u32 = self
            .deductions(issues)
            .values()
            .fold(0u32, |sum, value| sum.saturating_add(*value));
        MAX_SCORE.saturating_sub(total) as u8
    }

    pub fn meets_requirements(&self, score: u8) -> bool {
        score >= self.config.passing_score
    }

    pub fn section_scores(&self, sections: &[Section]) -> BTreeMap<String, u8> {
        let mut scores = BTreeMap::new();
        for section in sections {
            let score = section_score(section);
            scores
                .entry(section.key())
                .and_modify(|existing: &mut u8| *existing = (*existing).min(score))
                .or_insert(score);
        }
        scores
    }
}

/// Readability of one section in isolation, 0..=100.
pub fn section_score(section: &Section) -> u8 {
    let mut score: i32 = 100;

    if section.lines.iter().any(|line| has_markup(line)) {
        score -= 10;
    }

    let glyphs = section
        .lines
        .iter()
        .flat_map(|line| line.chars())
        .filter(|c| is_decorative(*c))
        .count();
    score -= (glyphs.min(5) as i32) * 5;

    if section.lines.iter().any(|line| is_table_line(line)) {
        score -= 15;
    }

    let words = section
        .lines
        .iter()
        .map(|line| line.split_whitespace().count())
        .sum::<usize>();
    if words < SHORT_SECTION_WORDS {
        score -= 10;
    } else if words > LONG_SECTION_WORDS {
        score -= 15;
    }

    let markers: BTreeSet<char> = section
        .lines
        .iter()
        .filter_map(|line| bullet_marker(line))
        .collect();
    if markers.len() > 1 {
        score -= 5;
    }

    score.clamp(0, 100) as u8
}
