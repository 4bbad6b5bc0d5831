// Outreach message pipeline: summarize background → generate message → clean output.
// All LLM calls go through llm_client::Completion; no direct HTTP calls here.

pub mod cleanup;
pub mod compliance;
pub mod generator;
pub mod handlers;
pub mod name_extractor;
pub mod pipeline;
pub mod prompts;
pub mod summarizer;
