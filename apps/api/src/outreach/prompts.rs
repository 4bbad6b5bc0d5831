//! Prompt templates and the fixed word lists that go with them.
//!
//! The templates are versioned text assets under `apps/api/prompts/`. Bump the
//! file suffix and `PROMPT_VERSION` together when a template changes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const PROMPT_VERSION: &str = "v1";

/// Summarization template. Placeholders: {background}
pub const SUMMARIZE_TEMPLATE: &str = include_str!("../../prompts/summarize.v1.txt");

/// Message generation template.
/// Placeholders: {output_only_instruction}, {max_chars}, {first_name}, {summary},
/// {sender_name}, {sender_persona}, {forbidden_words}, {prospect_name},
/// {designation}, {company}, {industry}
pub const GENERATE_TEMPLATE: &str = include_str!("../../prompts/generate.v1.txt");

pub const DEFAULT_SENDER_NAME: &str = "Joseph";

pub const DEFAULT_SENDER_PERSONA: &str = "PhD in IT | Director, Digital Transformation at Speridian | \
    AI & Digital Strategy | Healthcare Informatics | Social Computing Scientist";

/// Advisory length bound quoted to the model. Never enforced by truncation.
pub const MAX_MESSAGE_CHARS: usize = 250;

/// Terms considered wrong for the tone: flattery and filler.
/// Listed in the prompt and stripped from the output.
pub const FORBIDDEN_WORDS: &[&str] = &[
    "exploring",
    "interested",
    "learning",
    "no easy feat",
    "impressive",
    "noteworthy",
    "remarkable",
    "fascinating",
    "admiring",
    "inspiring",
    "no small feat",
    "no easy task",
    "stood out",
];

/// Labels the model sometimes puts on a line of its own before the message.
pub const KNOWN_PREAMBLES: &[&str] = &[
    "Here is a LinkedIn connection message",
    "Here’s a LinkedIn message",
    "LinkedIn connection message:",
    "Message:",
    "Output:",
];

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is hardcoded and must be valid")
});

/// Fills `{name}` placeholders in a single pass.
///
/// Substituted values are never rescanned, so prospect text that happens to
/// contain `{sender_name}` stays literal. Unknown placeholders are left as-is.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
