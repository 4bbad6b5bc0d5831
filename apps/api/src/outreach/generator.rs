//! Message Generator: builds the outreach prompt, requests a completion, cleans the result.
//!
//! Flow: resolve greeting name → render template → LLM complete → cleanup rules →
//!       compliance report.
//!
//! A completion failure is the pipeline's single failed terminal state; it is
//! absorbed here and surfaces only as `GENERATION_FAILED`.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{SenderProfile, StageSettings};
use crate::llm_client::prompts::OUTPUT_ONLY_INSTRUCTION;
use crate::llm_client::Completion;
use crate::models::prospect::ProspectRequest;
use crate::outreach::cleanup::{clean, CleanupRule};
use crate::outreach::compliance::{check_message, ComplianceReport};
use crate::outreach::name_extractor::{extract_name, first_name, FALLBACK_NAME};
use crate::outreach::prompts::{
    render_template, FORBIDDEN_WORDS, GENERATE_TEMPLATE, MAX_MESSAGE_CHARS,
};
use crate::outreach::summarizer::SummarizedBackground;

pub const GENERATION_FAILED: &str = "Failed to generate message";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOutcome {
    Generated,
    Failed,
}

/// The pipeline's terminal artifact.
///
/// `compliance` is `None` for the failure string: there is no model output to judge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedMessage {
    pub text: String,
    pub outcome: MessageOutcome,
    pub cleanup_applied: Vec<CleanupRule>,
    pub compliance: Option<ComplianceReport>,
}

impl GeneratedMessage {
    fn failed() -> Self {
        Self {
            text: GENERATION_FAILED.to_string(),
            outcome: MessageOutcome::Failed,
            cleanup_applied: Vec::new(),
            compliance: None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt construction
// ────────────────────────────────────────────────────────────────────────────

/// Name used in the "Hi {first_name}," greeting.
///
/// The explicit prospect name wins. Without one, the name heuristic runs over
/// the model summary. Fallback summaries are never mined: their first word is
/// a sentinel, not a name.
pub fn resolve_first_name(prospect: &ProspectRequest, summary: &SummarizedBackground) -> String {
    if !prospect.prospect_name.trim().is_empty() {
        return first_name(&prospect.prospect_name).to_string();
    }
    if summary.is_fallback() {
        return FALLBACK_NAME.to_string();
    }
    first_name(&extract_name(summary.text())).to_string()
}

/// Fills the generation template with prospect data, summary and sender persona.
pub fn build_generation_prompt(
    prospect: &ProspectRequest,
    summary: &SummarizedBackground,
    sender: &SenderProfile,
) -> String {
    let first_name = resolve_first_name(prospect, summary);
    let forbidden_words = FORBIDDEN_WORDS.join(", ");
    let max_chars = MAX_MESSAGE_CHARS.to_string();

    render_template(
        GENERATE_TEMPLATE,
        &[
            ("output_only_instruction", OUTPUT_ONLY_INSTRUCTION),
            ("max_chars", &max_chars),
            ("first_name", &first_name),
            ("summary", summary.text()),
            ("sender_name", &sender.name),
            ("sender_persona", &sender.persona),
            ("forbidden_words", &forbidden_words),
            ("prospect_name", &prospect.prospect_name),
            ("designation", &prospect.designation),
            ("company", &prospect.company),
            ("industry", &prospect.industry),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates, cleans and checks one outreach message. Never fails.
pub async fn generate(
    llm: &dyn Completion,
    settings: &StageSettings,
    sender: &SenderProfile,
    prospect: &ProspectRequest,
    summary: &SummarizedBackground,
) -> GeneratedMessage {
    let prompt = build_generation_prompt(prospect, summary, sender);

    let raw = match llm
        .complete(&prompt, &settings.model, settings.temperature)
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Message generation failed: {e}");
            return GeneratedMessage::failed();
        }
    };

    let cleaned = clean(&raw);
    if !cleaned.applied.is_empty() {
        info!("Cleanup rules applied: {:?}", cleaned.applied);
    }

    let compliance = check_message(&cleaned.text, &sender.name);
    if !compliance.passed {
        warn!(
            "Generated message breaks {} rule(s): {:?}",
            compliance.violations.len(),
            compliance.violations
        );
    }

    GeneratedMessage {
        text: cleaned.text,
        outcome: MessageOutcome::Generated,
        cleanup_applied: cleaned.applied,
        compliance: Some(compliance),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
