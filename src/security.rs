//! Log sanitization
//!
//! Never log API keys or full input contents. Error messages from the
//! translation provider can echo request headers back; anything that goes
//! through `print_error`/`print_verbose` should pass through here first.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Maximum length for input content in verbose logs
const MAX_PREVIEW_LEN: usize = 50;

/// Bearer-style credentials and `key=value` secrets
static SECRET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)sk-[A-Za-z0-9_-]{8,}|(?:api[_-]?key|authorization)\s*[:=]\s*(?:bearer\s+)?\S+|bearer\s+\S+",
    )
    .expect("secret pattern compiles")
});

/// Replace anything that looks like a credential with a marker.
pub fn redact_secrets(text: &str) -> Cow<'_, str> {
    SECRET_PATTERN.replace_all(text, "[REDACTED]")
}

/// Bounded single-line preview of user input for verbose logs.
pub fn preview(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let trimmed = flattened.trim();
    if trimmed.chars().count() <= MAX_PREVIEW_LEN {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(MAX_PREVIEW_LEN).collect();
    format!("{head}...")
}
