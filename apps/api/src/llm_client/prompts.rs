// Shared prompt fragments.
// Each stage that needs LLM calls defines its own prompts alongside it.
// This file contains cross-cutting fragments substituted into those templates.

/// Prepended to prompts whose raw output is shown to the user verbatim.
pub const OUTPUT_ONLY_INSTRUCTION: &str = "\
IMPORTANT: Output ONLY the message itself.
Do NOT include explanations, labels, or introductions.";
