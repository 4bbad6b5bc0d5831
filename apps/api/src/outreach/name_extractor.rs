//! Heuristic proper-noun detector used to pick a greeting name.
//!
//! Not a named-entity recognizer: the first capitalized word of a sentence is
//! as likely to match as an actual name.

use std::sync::LazyLock;

use regex::Regex;

/// Greeting target when no candidate name is found.
pub const FALLBACK_NAME: &str = "there";

static CAPITALIZED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)?")
        .expect("name pattern is hardcoded and must be valid")
});

/// Returns the first "Capitalized" or "Capitalized Capitalized" run in `text`,
/// or `"there"`.
pub fn extract_name(text: &str) -> String {
    CAPITALIZED_NAME_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// First whitespace-separated token of a name, or `"there"` for blank input.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(FALLBACK_NAME)
}
