//! Handler for the video analysis endpoint.
//!
//! Validates the frame payload, checks the gateway credential
//! precondition, submits the coaching prompt to the vision model with
//! bounded retries, and normalizes the reply into the fixed report schema.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use formsight_core::error::CoreError;
use formsight_core::report::{parse_reply, AnalysisReport};
use formsight_core::request::AnalysisRequest;

use crate::error::AppResult;
use crate::state::AppState;

/// Response body returned by the `POST /analyze` endpoint.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// The structured coaching report.
    pub analysis: AnalysisReport,
}

/// POST /api/v1/analyze
///
/// Accepts `{ "frames": [<data URI>, ...] }` and returns
/// `{ "analysis": <report> }`. The credential check runs before any
/// gateway attempt so configuration faults never consume retry budget.
pub async fn analyze_video(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<AnalyzeResponse>> {
    let request = AnalysisRequest::from_value(&body)?;

    let api_key = state.config.gateway.api_key.as_deref().ok_or_else(|| {
        CoreError::Configuration("AI_GATEWAY_API_KEY is not set".to_string())
    })?;

    tracing::info!(frame_count = request.frames.len(), "Analyzing video frames");

    let reply = state
        .gateway
        .request_analysis(api_key, &request.frames)
        .await?;

    let outcome = parse_reply(&reply);
    if outcome.is_fallback() {
        tracing::warn!("Model reply was not parseable; returning fallback report");
    }

    Ok(Json(AnalyzeResponse {
        analysis: outcome.into_report(),
    }))
}
