//! Axum route handlers for the Outreach API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::prospect::ProspectRequest;
use crate::outreach::compliance::ComplianceReport;
use crate::outreach::pipeline::run;
use crate::outreach::summarizer::{summarize, SummarySource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub request_id: Uuid,
    pub final_message: String,
    /// Set when either stage substituted a fallback sentence.
    pub degraded: bool,
    pub summary_source: SummarySource,
    pub compliance: Option<ComplianceReport>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub source: SummarySource,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/messages
///
/// Full pipeline: summarize background → generate → cleanup → compliance report.
/// Always 200 once the body is valid; upstream failures show up as fallback text.
pub async fn handle_generate_message(
    State(state): State<AppState>,
    payload: Result<Json<ProspectRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = payload?;
    let request = request.validated()?;

    let outcome = run(state.llm.as_ref(), &state.config.pipeline, &request).await;

    Ok(Json(MessageResponse {
        request_id: outcome.request_id,
        degraded: outcome.is_degraded(),
        summary_source: outcome.summary.source(),
        final_message: outcome.message.text,
        compliance: outcome.message.compliance,
        generated_at: outcome.generated_at,
    }))
}

/// POST /api/v1/messages/summarize
///
/// Runs only the summarizer. Useful for previewing what the generator will see.
pub async fn handle_summarize(
    State(state): State<AppState>,
    payload: Result<Json<ProspectRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, AppError> {
    let Json(request) = payload?;
    let request = request.validated()?;

    let summary = summarize(
        state.llm.as_ref(),
        &state.config.pipeline.summarizer,
        &request.prospect_background,
    )
    .await;

    Ok(Json(SummaryResponse {
        source: summary.source(),
        summary: summary.text().to_string(),
    }))
}
