//! Background Summarizer: compresses a free-text background into three bullet points.
//!
//! Total function: every failure degrades to a fixed sentence, nothing is returned as an error.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::StageSettings;
use crate::llm_client::Completion;
use crate::outreach::prompts::{render_template, SUMMARIZE_TEMPLATE};

/// Hard cutoff on forwarded background, in characters. May split a word.
pub const MAX_BACKGROUND_CHARS: usize = 4000;

pub const NO_CONTENT_SENTINEL: &str = "No content to summarize.";
pub const SUMMARY_UNAVAILABLE: &str = "Background summary unavailable";

/// Where a summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Model,
    NoContent,
    Unavailable,
}

/// Output of the summarizer. The text is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizedBackground {
    text: String,
    source: SummarySource,
}

impl SummarizedBackground {
    fn from_model(text: String) -> Self {
        Self {
            text,
            source: SummarySource::Model,
        }
    }

    pub fn no_content() -> Self {
        Self {
            text: NO_CONTENT_SENTINEL.to_string(),
            source: SummarySource::NoContent,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            text: SUMMARY_UNAVAILABLE.to_string(),
            source: SummarySource::Unavailable,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> SummarySource {
        self.source
    }

    /// True when the text is a fallback sentence rather than model output.
    pub fn is_fallback(&self) -> bool {
        self.source != SummarySource::Model
    }
}

/// First `MAX_BACKGROUND_CHARS` characters of `text`.
pub fn truncate_background(text: &str) -> &str {
    match text.char_indices().nth(MAX_BACKGROUND_CHARS) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

pub fn build_summarize_prompt(background: &str) -> String {
    render_template(
        SUMMARIZE_TEMPLATE,
        &[("background", truncate_background(background))],
    )
}

/// Summarizes `text` into key bullet points.
///
/// Empty input short-circuits to the no-content sentinel without calling the model.
pub async fn summarize(
    llm: &dyn Completion,
    settings: &StageSettings,
    text: &str,
) -> SummarizedBackground {
    if text.is_empty() {
        debug!("Empty background, skipping summarization");
        return SummarizedBackground::no_content();
    }

    let prompt = build_summarize_prompt(text);

    match llm
        .complete(&prompt, &settings.model, settings.temperature)
        .await
    {
        Ok(summary) => {
            let summary = summary.trim();
            if summary.is_empty() {
                warn!("Summarization returned blank text, using fallback");
                SummarizedBackground::unavailable()
            } else {
                SummarizedBackground::from_model(summary.to_string())
            }
        }
        Err(e) => {
            warn!("Summarization error: {e}");
            SummarizedBackground::unavailable()
        }
    }
}
