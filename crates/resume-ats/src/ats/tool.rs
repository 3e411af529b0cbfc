use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::domain::{AtsAnalysisResult, FileInfo};
use super::service::AtsAnalyzer;

/// Every failure surfaced by a tool carries the same prefix.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("ATS Scoring failed: invalid input: {0}")]
    InvalidInput(#[source] serde_json::Error),
    #[error("ATS Scoring failed: unable to encode result: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("ATS Scoring failed: {0}")]
    Scoring(String),
}

/// An async, JSON-in/JSON-out capability that an agent runtime can invoke by name.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema for the accepted input.
    fn parameters(&self) -> Value;

    async fn run(&self, input: Value) -> Result<Value, ToolError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResumeInput {
    pub resume_text: String,
    #[serde(default)]
    pub file_info: FileInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

/// `score_resume`: runs the full analysis for one resume.
#[derive(Debug, Clone)]
pub struct ScoreResumeTool {
    analyzer: Arc<AtsAnalyzer>,
}

impl ScoreResumeTool {
    pub const NAME: &'static str = "score_resume";

    pub fn new(analyzer: Arc<AtsAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub async fn score(&self, input: ScoreResumeInput) -> Result<AtsAnalysisResult, ToolError> {
        let analyzer = Arc::clone(&self.analyzer);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            analyzer.analyze(
                &input.resume_text,
                &input.file_info,
                input.job_description.as_deref(),
            )
        }));

        match outcome {
            Ok(result) => {
                info!(
                    tool = Self::NAME,
                    score = result.score,
                    issues = result.issues.len(),
                    "resume scored"
                );
                Ok(result)
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|message| message.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "analysis aborted".to_string());
                warn!(tool = Self::NAME, %message, "resume scoring aborted");
                Err(ToolError::Scoring(message))
            }
        }
    }
}

impl Default for ScoreResumeTool {
    fn default() -> Self {
        Self::new(Arc::new(AtsAnalyzer::default()))
    }
}

#[async_trait]
impl AgentTool for ScoreResumeTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Scores a resume for ATS compatibility and lists issues with suggested fixes"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "required": ["resumeText"],
            "properties": {
                "resumeText": {
                    "type": "string",
                    "description": "Plain text of the resume"
                },
                "fileInfo": {
                    "type": "object",
                    "properties": {
                        "format": { "type": "string" },
                        "size": { "type": "number" }
                    }
                },
                "jobDescription": {
                    "type": "string",
                    "description": "Optional job description for keyword matching"
                }
            }
        })
    }

    async fn run(&self, input: Value) -> Result<Value, ToolError> {
        let input: ScoreResumeInput =
            serde_json::from_value(input).map_err(ToolError::InvalidInput)?;
        let result = self.score(input).await?;
        serde_json::to_value(result).map_err(ToolError::Encode)
    }
}
