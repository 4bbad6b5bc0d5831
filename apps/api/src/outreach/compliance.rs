//! Compliance check: reports which message invariants a final text breaks.
//!
//! Read-only: nothing here edits the message. The model is not guaranteed to
//! follow the prompt, so a failed report is logged and returned to the caller,
//! never treated as an error.

use serde::Serialize;

use crate::outreach::cleanup::{find_forbidden_words, starts_with_preamble};
use crate::outreach::prompts::MAX_MESSAGE_CHARS;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    Empty,
    LeftoverPreamble,
    MissingGreeting,
    MissingSignOff { sender_name: String },
    ForbiddenWord { word: String },
    TooLong { chars: usize, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub passed: bool,
    pub violations: Vec<Violation>,
}

/// Checks a cleaned message against every rule and collects all failures.
pub fn check_message(text: &str, sender_name: &str) -> ComplianceReport {
    let text = text.trim();

    if text.is_empty() {
        return ComplianceReport {
            passed: false,
            violations: vec![Violation::Empty],
        };
    }

    let mut violations = Vec::new();

    if starts_with_preamble(text) {
        violations.push(Violation::LeftoverPreamble);
    }

    if !has_greeting(text) {
        violations.push(Violation::MissingGreeting);
    }

    if !has_sign_off(text, sender_name) {
        violations.push(Violation::MissingSignOff {
            sender_name: sender_name.to_string(),
        });
    }

    violations.extend(
        find_forbidden_words(text)
            .into_iter()
            .map(|word| Violation::ForbiddenWord {
                word: word.to_string(),
            }),
    );

    let chars = text.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        violations.push(Violation::TooLong {
            chars,
            limit: MAX_MESSAGE_CHARS,
        });
    }

    ComplianceReport {
        passed: violations.is_empty(),
        violations,
    }
}

/// First line reads "Hi <name>," (the comma may be missing).
fn has_greeting(text: &str) -> bool {
    text.lines()
        .next()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("Hi ")
                .map(|rest| !rest.trim().trim_end_matches(',').is_empty())
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

/// "Best," followed by the sender name, on the same line or the next.
fn has_sign_off(text: &str, sender_name: &str) -> bool {
    let lower = text.to_lowercase();
    lower
        .rfind("best,")
        .map(|idx| lower[idx + "best,".len()..].contains(&sender_name.to_lowercase()))
        .unwrap_or(false)
}
