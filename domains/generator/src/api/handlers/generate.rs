//! Content-generation API handlers
//!
//! Each endpoint validates its inputs, runs the matching MISO workflow in
//! blocking mode, and extracts its named output field through the shared
//! response-shape normalizer. A missing field is an upstream shape error,
//! not a silent empty success.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use ally_common::{shape, Error, Result, ValidatedJson};
use ally_miso::{WorkflowApi, DEFAULT_CHAT_USER};

use crate::api::middleware::GeneratorState;
use crate::domain::entities::{render_context, QuestionAnswer};

/// Run a workflow and pull one named output field out of whichever nesting
/// shape the upstream chose
async fn run_and_extract(
    workflow: &dyn WorkflowApi,
    inputs: Value,
    field: &'static str,
) -> Result<Json<Value>> {
    let body = workflow.run(inputs, DEFAULT_CHAT_USER).await?;

    let value = shape::extract_field(&body, field).ok_or_else(|| {
        tracing::warn!(field, "Workflow response matched none of the known shapes");
        Error::UpstreamShape(format!("workflow response carries no '{}' output", field))
    })?;

    Ok(Json(json!({ field: value })))
}

/// Request for generating a PRD from the questionnaire
#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePrdRequest {
    /// Must be present and non-empty. An empty questionnaire would send an
    /// empty context upstream.
    #[validate(
        length(min = 1, message = "Questions and answers are required"),
        nested
    )]
    pub questions_and_answers: Vec<QuestionAnswer>,
}

/// Generate a PRD from answered questionnaire items
pub async fn generate_prd(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GeneratePrdRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({ "context": render_context(&req.questions_and_answers) });
    run_and_extract(state.workflow.as_ref(), inputs, "prd").await
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateDesignRequest {
    #[validate(length(min = 1, message = "PRD is required"))]
    pub prd: String,
}

/// Generate a screen-design outline from a PRD
pub async fn generate_design(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GenerateDesignRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({ "prd": req.prd });
    run_and_extract(state.workflow.as_ref(), inputs, "design").await
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateDatabaseRequest {
    #[validate(length(min = 1, message = "PRD is required"))]
    pub prd: String,
    pub design: Option<String>,
}

/// Generate a database outline from a PRD (and optional design)
pub async fn generate_database(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GenerateDatabaseRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({
        "prd": req.prd,
        "design": req.design.unwrap_or_default(),
    });
    run_and_extract(state.workflow.as_ref(), inputs, "database").await
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, message = "Idea is required"))]
    pub idea: String,
    pub persona: Option<String>,
    pub pain_point: Option<String>,
}

/// Generate questionnaire items for an idea
pub async fn generate_questions(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GenerateQuestionsRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({
        "idea": req.idea,
        "persona": req.persona.unwrap_or_default(),
        "pain_point": req.pain_point.unwrap_or_default(),
    });
    run_and_extract(state.workflow.as_ref(), inputs, "questions").await
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateHintRequest {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    pub context: Option<String>,
}

/// Generate an answering hint for one questionnaire item
pub async fn generate_hint(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GenerateHintRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({
        "question": req.question,
        "context": req.context.unwrap_or_default(),
    });
    run_and_extract(state.workflow.as_ref(), inputs, "hint").await
}

#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePromptRequest {
    #[validate(length(min = 1, message = "PRD is required"))]
    pub prd: String,
    pub design: Option<String>,
}

/// Generate a UI-generation prompt (the v0 hand-off input) from a PRD
pub async fn generate_prompt(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GeneratePromptRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({
        "prd": req.prd,
        "design": req.design.unwrap_or_default(),
    });
    run_and_extract(state.workflow.as_ref(), inputs, "prompt").await
}

/// Request for summarizing a Mini-Ally ideation session
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateSummaryRequest {
    #[validate(length(min = 1, message = "Persona is required"))]
    pub persona: String,
    #[validate(length(min = 1, message = "Pain point is required"))]
    pub pain_point: String,
    #[validate(length(min = 1, message = "Solution idea is required"))]
    pub solution_idea: String,
    #[serde(default)]
    #[validate(nested)]
    pub expert_qa: Vec<QuestionAnswer>,
}

/// Summarize a Mini-Ally ideation session into a project brief
pub async fn generate_summary(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<GenerateSummaryRequest>,
) -> Result<Json<Value>> {
    let inputs = json!({
        "persona": req.persona,
        "pain_point": req.pain_point,
        "solution_idea": req.solution_idea,
        "expert_qa": render_context(&req.expert_qa),
    });
    run_and_extract(state.workflow.as_ref(), inputs, "summary").await
}
