//! Pipeline Orchestrator: Summarizing → Generating → Done.
//!
//! Strictly linear: both stages always run, failures are absorbed inside each
//! stage, and every run ends in `Done` with some message text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::PipelineSettings;
use crate::llm_client::Completion;
use crate::models::prospect::ProspectRequest;
use crate::outreach::generator::{generate, GeneratedMessage, MessageOutcome};
use crate::outreach::summarizer::{summarize, SummarizedBackground};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Summarizing,
    Generating,
    Done,
}

impl PipelineStage {
    /// The only transition out of each stage. `Done` is terminal.
    pub fn next(self) -> Self {
        match self {
            PipelineStage::Summarizing => PipelineStage::Generating,
            PipelineStage::Generating | PipelineStage::Done => PipelineStage::Done,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Summarizing => "summarizing",
            PipelineStage::Generating => "generating",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything one run produced. Discarded once the response is sent.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub request_id: Uuid,
    pub summary: SummarizedBackground,
    pub message: GeneratedMessage,
    pub generated_at: DateTime<Utc>,
}

impl PipelineOutcome {
    pub fn final_message(&self) -> &str {
        &self.message.text
    }

    /// True when either stage fell back to a fixed sentence.
    pub fn is_degraded(&self) -> bool {
        self.summary.is_fallback() || self.message.outcome == MessageOutcome::Failed
    }
}

/// Runs both stages for one request.
pub async fn run(
    llm: &dyn Completion,
    settings: &PipelineSettings,
    request: &ProspectRequest,
) -> PipelineOutcome {
    let request_id = Uuid::new_v4();
    let span = info_span!("outreach_pipeline", %request_id);

    async move {
        let mut stage = PipelineStage::Summarizing;
        debug!("Stage: {stage}");
        let summary = summarize(llm, &settings.summarizer, &request.prospect_background).await;
        info!("Summary ready (source: {:?})", summary.source());

        stage = stage.next();
        debug!("Stage: {stage}");
        let message = generate(
            llm,
            &settings.generator,
            &settings.sender,
            request,
            &summary,
        )
        .await;

        stage = stage.next();
        debug!("Stage: {stage}");

        let outcome = PipelineOutcome {
            request_id,
            summary,
            message,
            generated_at: Utc::now(),
        };
        info!(
            "Pipeline finished: outcome={:?}, degraded={}, chars={}",
            outcome.message.outcome,
            outcome.is_degraded(),
            outcome.final_message().chars().count()
        );
        outcome
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedCompletion;
    use crate::outreach::summarizer::SummarySource;

    fn request(background: &str) -> ProspectRequest {
        ProspectRequest {
            prospect_name: "John".to_string(),
            prospect_background: background.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stage_transitions_are_linear() {
        let stage = PipelineStage::Summarizing;
        assert_eq!(stage.next(), PipelineStage::Generating);
        assert_eq!(stage.next().next(), PipelineStage::Done);
        assert_eq!(PipelineStage::Done.next(), PipelineStage::Done);
        assert_eq!(PipelineStage::Generating.to_string(), "generating");
    }

    #[tokio::test]
    async fn test_summary_feeds_generator_prompt() {
        let llm = ScriptedCompletion::new()
            .reply("- Built MidFirst's credit team")
            .reply("Hi John,\nWould be great to connect.\nBest,\nJoseph");
        let outcome = run(&llm, &PipelineSettings::default(), &request("long bio")).await;

        let calls = llm.calls();
        assert_eq!(calls.len(), 2, "summarize then generate");
        assert!(calls[0].prompt.contains("long bio"));
        assert!(calls[1].prompt.contains("- Built MidFirst's credit team"));
        assert!(!calls[1].prompt.contains("long bio"));
        assert_eq!(outcome.final_message(), "Hi John,\nWould be great to connect.\nBest,\nJoseph");
        assert!(!outcome.is_degraded());
    }

    /// Scenario A: empty background.
    #[tokio::test]
    async fn test_empty_background_sends_sentinel_to_generator() {
        let llm = ScriptedCompletion::new().reply("Hi John,\nLet's connect.\nBest,\nJoseph");
        let outcome = run(&llm, &PipelineSettings::default(), &request("")).await;

        let calls = llm.calls();
        assert_eq!(calls.len(), 1, "summarizer must not call the model");
        assert!(calls[0].prompt.contains("No content to summarize."));
        assert_eq!(outcome.summary.source(), SummarySource::NoContent);
        assert_eq!(outcome.final_message(), "Hi John,\nLet's connect.\nBest,\nJoseph");
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_summarizer_failure_still_generates() {
        let llm = ScriptedCompletion::new()
            .fail("timeout")
            .reply("Hi John,\nLet's connect.\nBest,\nJoseph");
        let outcome = run(&llm, &PipelineSettings::default(), &request("bio")).await;

        assert!(llm.calls()[1]
            .prompt
            .contains("Key Highlight: Background summary unavailable"));
        assert_eq!(outcome.message.outcome, MessageOutcome::Generated);
    }

    #[tokio::test]
    async fn test_generator_failure_yields_fixed_literal() {
        let llm = ScriptedCompletion::new().reply("- a").fail("500");
        let outcome = run(&llm, &PipelineSettings::default(), &request("bio")).await;
        assert_eq!(outcome.final_message(), "Failed to generate message");
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_both_stages_failing_still_completes() {
        let llm = ScriptedCompletion::new().fail("down").fail("down");
        let outcome = run(&llm, &PipelineSettings::default(), &request("bio")).await;
        assert_eq!(outcome.final_message(), "Failed to generate message");
        assert_eq!(outcome.summary.source(), SummarySource::Unavailable);
    }

    /// Scenario B: forbidden word in raw output.
    #[tokio::test]
    async fn test_forbidden_word_removed_end_to_end() {
        let llm = ScriptedCompletion::new()
            .reply("- a")
            .reply("Hi John,\nYour impressive work at MidFirst. Would be glad to connect.\nBest,\nJoseph");
        let outcome = run(&llm, &PipelineSettings::default(), &request("bio")).await;

        let text = outcome.final_message().to_lowercase();
        assert!(!text.split(|c: char| !c.is_alphanumeric()).any(|w| w == "impressive"));
    }

    /// Scenario C: preamble line in raw output.
    #[tokio::test]
    async fn test_preamble_removed_end_to_end() {
        let llm = ScriptedCompletion::new()
            .reply("- a")
            .reply("Message:\nHi John,\nSaw your work at MidFirst. Would be great to connect.\nBest,\nJoseph");
        let outcome = run(&llm, &PipelineSettings::default(), &request("bio")).await;
        assert!(outcome.final_message().starts_with("Hi John,"));
    }

    #[tokio::test]
    async fn test_each_run_gets_its_own_request_id() {
        let llm = ScriptedCompletion::new().reply("m1").reply("m2");
        let settings = PipelineSettings::default();
        let first = run(&llm, &settings, &request("")).await;
        let second = run(&llm, &settings, &request("")).await;
        assert_ne!(first.request_id, second.request_id);
    }
}
