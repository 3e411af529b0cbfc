use std::sync::Arc;

use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;

use crate::ats::alignment::{
    ContentItem, ContentMetadata, ContentType, DateRange, JobAlignmentScorer, JobContext, Sector,
};
use crate::ats::domain::{FileInfo, Issue, IssueType};
use crate::ats::{ats_router, AtsAnalyzer, AtsService};

pub(super) const PERFECT_RESUME: &str = "\
Jane Doe
jane.doe@example.com | (555) 123-4567 | Chicago, IL

PROFESSIONAL SUMMARY
Backend engineer with eight years of experience building reliable payment and data platforms in Rust and Python.

EXPERIENCE
Senior Software Engineer
Acme Payments | 01/2020 - Present
- Led migration of settlement services to Rust, cutting latency by 40 percent
- Mentored five engineers on testing and code review practices

Software Engineer
Beta Data | 06/2016 - 12/2019
- Built PostgreSQL ingestion pipelines processing two million rows per day

EDUCATION
B.S. Computer Science, State University, 2012 - 2016

SKILLS
Rust, Python, PostgreSQL, Docker, Kubernetes, AWS
";

pub(super) const DECORATED_RESUME: &str = "\
Jane Doe
jane@example.com

EXPERIENCE
Acme Corp | 2023 to now
★ Star performer on the platform team
• Managed deployments for twelve services
";

pub(super) const MARKDOWN_RESUME: &str = "\
# Jane Doe
jane@example.com

## My Journey
Started coding at twelve.

## Work Experience
Acme | 2019 - 2021
- Shipped things

## Skills
| Skill | Years |
|---|---|
| Rust | 5 |
";

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn pdf() -> FileInfo {
    FileInfo::new("pdf", 120_000)
}

pub(super) fn analyzer() -> AtsAnalyzer {
    AtsAnalyzer::default().with_reference_year(2025)
}

pub(super) fn issue(issue_type: IssueType) -> Issue {
    Issue::new(issue_type, format!("{} issue", issue_type.label()), "fix it")
}

pub(super) fn issues(issue_type: IssueType, count: usize) -> Vec<Issue> {
    (0..count).map(|_| issue(issue_type)).collect()
}

pub(super) fn job_context() -> JobContext {
    JobContext {
        title: "Senior Backend Engineer".to_string(),
        sector: Sector::Tech,
        description: "Build Rust services on AWS, operate Kubernetes clusters, mentor engineers."
            .to_string(),
        required_skills: vec!["Rust".to_string(), "JavaScript".to_string()],
        experience_level: Some("5+ years".to_string()),
        education_requirements: Vec::new(),
        responsibilities: Vec::new(),
        organization: None,
    }
}

pub(super) fn content_item(id: &str, content_type: ContentType, content: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        content_type,
        content: content.to_string(),
        section: "experience".to_string(),
        metadata: ContentMetadata::default(),
    }
}

pub(super) fn experience_item(start_year: i32, end_year: Option<i32>) -> ContentItem {
    let mut item = content_item("exp-1", ContentType::Experience, "Platform engineer at Acme");
    item.metadata = ContentMetadata {
        date_range: Some(DateRange {
            start: NaiveDate::from_ymd_opt(start_year, 1, 1).expect("valid date"),
            end: end_year.map(|year| NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date")),
        }),
        recency: 0.9,
        impact: 0.7,
        keywords: vec!["Rust".to_string(), "AWS".to_string(), "Terraform".to_string()],
        sectors: vec![Sector::Tech],
    };
    item
}

pub(super) fn scorer() -> JobAlignmentScorer {
    JobAlignmentScorer::default().with_reference_date(reference_date())
}

pub(super) fn router() -> Router {
    let service = AtsService::new(Arc::new(analyzer())).with_scorer(scorer());
    ats_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
