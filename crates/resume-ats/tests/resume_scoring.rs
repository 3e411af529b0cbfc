use resume_ats::ats::scoring::ScoringEngine;
use resume_ats::{AtsAnalyzer, FileInfo, IssueType, SkillMatcher};

const CLEAN_RESUME: &str = "\
Alex Rivera
alex.rivera@example.com | 555-867-5309

## Professional Summary
Site reliability engineer focused on observability, incident response and capacity planning for large platforms.

## Experience
Staff SRE, Northwind | 03/2021 - Present
- Cut paging volume in half by rewriting alert rules

SRE, Contoso | 2017 - 2021
- Automated database failover drills

## Education
B.Sc. Physics, Lakeside College

## Skills
Go, Kubernetes, Terraform, PostgreSQL
";

const MESSY_RESUME: &str = "\
Alex Rivera
alex.rivera@example.com

## Experience
Northwind | 2023 to now
★ Reduced pages
• Wrote runbooks
";

fn analyzer() -> AtsAnalyzer {
    AtsAnalyzer::default().with_reference_year(2025)
}

#[test]
fn empty_issue_list_scores_one_hundred() {
    assert_eq!(ScoringEngine::default().score(&[]), 100);
}

#[test]
fn clean_resume_has_no_issues() {
    let result = analyzer().analyze(CLEAN_RESUME, &FileInfo::new("pdf", 80_000), None);
    assert_eq!(result.score, 100, "unexpected issues: {:?}", result.issues);
    assert!(result.issues.is_empty());
}

#[test]
fn decorative_bullets_and_unparseable_dates_lower_the_score() {
    let result = analyzer().analyze(MESSY_RESUME, &FileInfo::new("pdf", 80_000), None);
    assert!(result.has_issue(IssueType::ComplexFormatting));
    assert!(result.has_issue(IssueType::MissingDates));
    assert!(result.score < 100);
}

#[test]
fn empty_resume_scores_one_hundred() {
    let result = analyzer().analyze("", &FileInfo::default(), None);
    assert_eq!(result.score, 100);
    assert!(result.issues.is_empty());
}

#[test]
fn result_serializes_with_wire_names() {
    let result = analyzer().analyze(MESSY_RESUME, &FileInfo::new("pdf", 80_000), None);
    let value = serde_json::to_value(&result).expect("serializes");
    assert_eq!(value["issues"][0]["type"], "COMPLEX_FORMATTING");
    assert_eq!(value["issues"][0]["severity"], "medium");
    assert!(value["sectionScores"].is_object());
    assert!(value["parseRate"].is_u64());
    assert!(value.get("section_scores").is_none());
    assert!(value.get("parse_rate").is_none());
}

#[test]
fn alias_lookup_is_case_insensitive() {
    let matcher = SkillMatcher::default();
    let canonical = matcher.find_skill("JavaScript").expect("javascript defined");
    assert_eq!(matcher.find_skill("JS"), Some(canonical));
    assert_eq!(matcher.find_skill("javascript"), Some(canonical));
    assert_eq!(matcher.find_skill("nodejs"), Some(canonical));
    assert!(matcher.are_related("typescript", "JS"));
}
