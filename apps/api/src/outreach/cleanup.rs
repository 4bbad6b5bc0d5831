//! Output cleanup: best-effort repair of raw model output.
//!
//! Rules run in a fixed order and each is idempotent. They mutate text only;
//! detecting what is still wrong afterwards is `compliance`'s job.
//!
//! Known rough edge: removing a word leaves its surrounding spaces and
//! punctuation in place ("a  b", "Hi ,"). That is not normalized here.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::outreach::prompts::{FORBIDDEN_WORDS, KNOWN_PREAMBLES};

/// A single cleanup step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupRule {
    StripPreamble,
    RemoveForbiddenWords,
}

/// Order matters: a preamble line may itself contain a forbidden word.
pub const CLEANUP_RULES: &[CleanupRule] =
    &[CleanupRule::StripPreamble, CleanupRule::RemoveForbiddenWords];

impl CleanupRule {
    pub fn apply(&self, text: &str) -> String {
        match self {
            CleanupRule::StripPreamble => strip_preamble(text),
            CleanupRule::RemoveForbiddenWords => remove_forbidden_words(text),
        }
    }
}

/// Cleaned text plus the rules that actually changed something.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupOutcome {
    pub text: String,
    pub applied: Vec<CleanupRule>,
}

/// Runs every rule in `CLEANUP_RULES` over the trimmed raw output.
pub fn clean(raw: &str) -> CleanupOutcome {
    let mut text = raw.trim().to_string();
    let mut applied = Vec::new();

    for rule in CLEANUP_RULES {
        let next = rule.apply(&text);
        if next != text {
            applied.push(*rule);
            text = next;
        }
    }

    CleanupOutcome { text, applied }
}

/// Drops leading label lines such as "Message:".
///
/// Case-insensitive prefix match. On a match everything up to and including
/// the first line break goes; repeats while the remainder still starts with a
/// known label. A label with no line break after it is left alone.
pub fn strip_preamble(text: &str) -> String {
    let mut message = text.trim();

    while starts_with_preamble(message) {
        match message.split_once('\n') {
            Some((_, rest)) => message = rest.trim(),
            None => break,
        }
    }

    message.to_string()
}

pub(crate) fn starts_with_preamble(text: &str) -> bool {
    let lower = text.to_lowercase();
    KNOWN_PREAMBLES
        .iter()
        .any(|p| lower.starts_with(&p.to_lowercase()))
}

static FORBIDDEN_WORD_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FORBIDDEN_WORDS
        .iter()
        .map(|word| forbidden_word_regex(word))
        .collect()
});

/// Whole-word, case-insensitive matcher for one forbidden term.
fn forbidden_word_regex(word: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .expect("forbidden word list is hardcoded and must compile")
}

/// Forbidden terms still present in `text`, in list order.
pub fn find_forbidden_words(text: &str) -> Vec<&'static str> {
    FORBIDDEN_WORDS
        .iter()
        .zip(FORBIDDEN_WORD_RES.iter())
        .filter(|(_, re)| re.is_match(text))
        .map(|(word, _)| *word)
        .collect()
}

/// Removes every whole-word occurrence of each forbidden term, then trims.
pub fn remove_forbidden_words(text: &str) -> String {
    FORBIDDEN_WORD_RES
        .iter()
        .fold(text.to_string(), |message, re| {
            re.replace_all(&message, "").trim().to_string()
        })
}
