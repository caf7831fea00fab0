//! Generic workflow-run handler
//!
//! The MISO-workflow design wizard submits arbitrary workflow inputs; this
//! endpoint forwards them under the generator credential and hands back the
//! outputs object, normalized across the upstream nesting shapes.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use ally_common::{shape, Error, Result};
use ally_miso::DEFAULT_CHAT_USER;

use crate::api::middleware::GeneratorState;

/// Request for a generic workflow run
#[derive(Debug, Deserialize)]
pub struct RunWorkflowRequest {
    pub inputs: Option<Value>,
    pub user: Option<String>,
}

/// Run a workflow with caller-provided inputs
pub async fn run_workflow(
    State(state): State<GeneratorState>,
    Json(req): Json<RunWorkflowRequest>,
) -> Result<Json<Value>> {
    let inputs = req
        .inputs
        .filter(Value::is_object)
        .ok_or_else(|| Error::Validation("inputs must be a JSON object".to_string()))?;

    let user = req.user.as_deref().unwrap_or(DEFAULT_CHAT_USER);

    let body = state.runner.run(inputs, user).await?;

    let outputs = shape::extract_outputs(&body).ok_or_else(|| {
        tracing::warn!("Workflow response matched none of the known shapes");
        Error::UpstreamShape("workflow response carries no outputs object".to_string())
    })?;

    Ok(Json(json!({ "outputs": outputs })))
}
