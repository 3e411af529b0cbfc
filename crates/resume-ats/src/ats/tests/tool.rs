use std::sync::Arc;

use super::common::*;
use crate::ats::tool::{AgentTool, ScoreResumeInput, ScoreResumeTool, ToolError};
use crate::ats::IssueType;
use serde_json::json;

fn tool() -> ScoreResumeTool {
    ScoreResumeTool::new(Arc::new(analyzer()))
}

#[tokio::test]
async fn run_accepts_camel_case_input() {
    let output = tool()
        .run(json!({
            "resumeText": DECORATED_RESUME,
            "fileInfo": { "format": "pdf", "size": 1024 },
            "jobDescription": "Platform engineer for deployments"
        }))
        .await
        .expect("tool output");

    assert_eq!(output["score"].as_u64(), Some(80));
    assert!(output["keywords"]["found"]
        .as_array()
        .unwrap()
        .contains(&json!("deployments")));
    assert!(output["keywords"]["relevanceScore"].is_number());
    assert!(output["keywords"]["detectedYears"].is_u64());
}

#[tokio::test]
async fn malformed_input_is_reported_with_prefix() {
    let error = tool()
        .run(json!({ "fileInfo": "not an object" }))
        .await
        .expect_err("input rejected");

    assert!(matches!(error, ToolError::InvalidInput(_)));
    assert!(error.to_string().starts_with("ATS Scoring failed: "));
}

#[tokio::test]
async fn typed_scoring_returns_analysis_result() {
    let result = tool()
        .score(ScoreResumeInput {
            resume_text: DECORATED_RESUME.to_string(),
            file_info: pdf(),
            job_description: None,
        })
        .await
        .expect("scored");

    assert!(result.has_issue(IssueType::MissingDates));
}

#[test]
fn tool_metadata_describes_inputs() {
    let tool = tool();
    assert_eq!(tool.name(), "score_resume");
    let schema = tool.parameters();
    assert_eq!(schema["required"], json!(["resumeText"]));
    assert!(schema["properties"]["jobDescription"].is_object());
}

#[test]
fn scoring_errors_share_the_failure_prefix() {
    let error = ToolError::Scoring("analysis aborted".to_string());
    assert_eq!(error.to_string(), "ATS Scoring failed: analysis aborted");
}
