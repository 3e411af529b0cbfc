use super::common::*;
use crate::ats::analyzer::extract_sections;
use crate::ats::domain::IssueType;
use crate::ats::scoring::{
    parse_rate, section_score, DeductionRule, Recommendation, ScoringConfig, ScoringEngine,
};
use serde_json::json;

#[test]
fn no_issues_scores_one_hundred() {
    assert_eq!(ScoringEngine::default().score(&[]), 100);
}

#[test]
fn deductions_are_capped_per_category() {
    let engine = ScoringEngine::default();
    let mut all = issues(IssueType::ComplexFormatting, 10);
    all.extend(issues(IssueType::MissingDates, 5));
    all.extend(issues(IssueType::NonstandardHeaders, 2));

    let deductions = engine.deductions(&all);
    assert_eq!(deductions[&IssueType::ComplexFormatting], 15);
    assert_eq!(deductions[&IssueType::MissingDates], 30);
    assert_eq!(deductions[&IssueType::NonstandardHeaders], 4);
    assert_eq!(engine.score(&all), 51);
}

#[test]
fn score_never_increases_as_issues_accumulate() {
    let engine = ScoringEngine::default();
    let mut accumulated = Vec::new();
    let mut previous = engine.score(&accumulated);

    for round in 0..4 {
        for issue_type in IssueType::ALL {
            accumulated.push(issue(issue_type));
            let current = engine.score(&accumulated);
            assert!(current <= previous, "round {round}: {current} > {previous}");
            previous = current;
        }
    }
    // every category is capped, so the rubric bottoms out above zero
    assert_eq!(previous, 20);
}

#[test]
fn score_is_independent_of_issue_order() {
    let engine = ScoringEngine::default();
    let mut forward: Vec<_> = IssueType::ALL.into_iter().map(issue).collect();
    forward.extend(issues(IssueType::MissingDates, 2));
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(engine.score(&forward), engine.score(&reversed));
}

#[test]
fn config_deserializes_with_defaults() {
    let config: ScoringConfig = serde_json::from_value(json!({
        "passing_score": 75,
        "deductions": { "MISSING_DATES": { "per_issue": 20, "cap": 40 } }
    }))
    .expect("config parses");

    assert_eq!(config.passing_score, 75);
    assert_eq!(config.rule(IssueType::MissingDates), DeductionRule::new(20, 40));
    assert_eq!(config.rule(IssueType::TableLayouts), DeductionRule::new(6, 6));
    assert_eq!(config.max_docx_bytes, 1024 * 1024);

    let engine = ScoringEngine::new(config);
    assert_eq!(engine.score(&issues(IssueType::MissingDates, 3)), 60);
    assert!(engine.meets_requirements(75));
    assert!(!engine.meets_requirements(74));
}

#[test]
fn passing_score_is_clamped() {
    let config = ScoringConfig::default().with_passing_score(140);
    assert_eq!(config.passing_score, 100);
}

#[test]
fn recommendation_bands() {
    assert_eq!(Recommendation::from_score(100), Recommendation::HighlyCompatible);
    assert_eq!(Recommendation::from_score(90), Recommendation::HighlyCompatible);
    assert_eq!(Recommendation::from_score(89), Recommendation::Good);
    assert_eq!(Recommendation::from_score(70), Recommendation::Good);
    assert_eq!(Recommendation::from_score(69), Recommendation::Moderate);
    assert_eq!(Recommendation::from_score(50), Recommendation::Moderate);
    assert_eq!(Recommendation::from_score(49), Recommendation::Low);
    assert_eq!(Recommendation::from_score(0), Recommendation::Low);
}

#[test]
fn parse_rate_counts_decorative_symbols() {
    assert_eq!(parse_rate(""), 100);
    assert_eq!(parse_rate("plain text"), 100);
    assert_eq!(parse_rate("★ab"), 67);
}

#[test]
fn section_scores_penalize_glyphs_and_mixed_bullets() {
    let sections = extract_sections(
        "# Skills\n★ Rust ★ Go ★ Python ★ SQL ★ AWS ★ Docker\n- Kubernetes\n* Terraform",
    );
    // six glyphs cap at -25, mixed markers -5
    assert_eq!(section_score(&sections[0]), 70);

    let engine = ScoringEngine::default();
    let scores = engine.section_scores(&sections);
    assert_eq!(scores.get("skills"), Some(&70));
}

#[test]
fn long_sections_lose_points() {
    let body = "word ".repeat(600);
    let sections = extract_sections(&format!("# Summary\n{body}"));
    assert_eq!(section_score(&sections[0]), 85);
}
