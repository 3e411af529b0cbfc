use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::alignment::{AlignmentWeights, ContentItem, JobContext};
use super::domain::AtsAnalysisResult;
use super::service::AtsService;
use super::taxonomy::SkillDefinition;
use super::tool::{AgentTool, ScoreResumeInput, ScoreResumeTool};

/// Router builder exposing the analysis, alignment, taxonomy and tool endpoints.
pub fn ats_router(service: Arc<AtsService>) -> Router {
    Router::new()
        .route("/api/v1/ats/analyze", post(analyze_handler))
        .route("/api/v1/ats/align", post(align_handler))
        .route("/api/v1/skills/:name", get(skill_handler))
        .route("/api/v1/tools/score_resume", post(score_resume_handler))
        .with_state(service)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: AtsAnalysisResult,
    pub meets_requirements: bool,
}

#[derive(Debug, Deserialize)]
pub struct AlignRequest {
    pub items: Vec<ContentItem>,
    pub job: JobContext,
    #[serde(default)]
    pub weights: Option<AlignmentWeights>,
}

#[derive(Debug, Serialize)]
pub struct SkillView<'a> {
    pub skill: &'a SkillDefinition,
    pub related: Vec<&'a SkillDefinition>,
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<AtsService>>,
    Json(request): Json<ScoreResumeInput>,
) -> Response {
    let analyzer = service.analyzer();
    let result = analyzer.analyze(
        &request.resume_text,
        &request.file_info,
        request.job_description.as_deref(),
    );
    let meets_requirements = analyzer.passes(result.score);

    (
        StatusCode::OK,
        Json(AnalyzeResponse {
            result,
            meets_requirements,
        }),
    )
        .into_response()
}

pub(crate) async fn align_handler(
    State(service): State<Arc<AtsService>>,
    Json(request): Json<AlignRequest>,
) -> Response {
    let scores = service.align(&request.items, &request.job, request.weights);
    (StatusCode::OK, Json(json!({ "scores": scores }))).into_response()
}

pub(crate) async fn skill_handler(
    State(service): State<Arc<AtsService>>,
    Path(name): Path<String>,
) -> Response {
    let matcher = service.matcher();
    match matcher.find_skill(&name) {
        Some(skill) => {
            let view = SkillView {
                skill,
                related: matcher.get_related_skills(&name),
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        None => {
            let payload = json!({
                "error": format!("unknown skill '{name}'"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_resume_handler(
    State(service): State<Arc<AtsService>>,
    Json(input): Json<Value>,
) -> Response {
    let tool = ScoreResumeTool::new(Arc::clone(service.analyzer()));
    match tool.run(input).await {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(error) => {
            let payload = json!({
                "tool": tool.name(),
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
