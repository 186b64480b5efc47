//! Terminal rendering of token boundaries
//!
//! Tokens are painted with a rotating palette so adjacent boundaries stay
//! visible, and whitespace inside a token is substituted with printable
//! marks (space → `·`, newline → `↵`, tab → `→`).

use crate::aligner::WordMapping;
use colored::{Color, Colorize};

const TOKEN_COLORS: &[Color] = &[
    Color::Blue,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Red,
];

/// Make whitespace visible inside a token box.
pub fn escape_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for ch in token.chars() {
        match ch {
            ' ' => out.push('·'),
            '\n' => out.push('↵'),
            '\t' => out.push('→'),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the flat token sequence, one colored box per token.
pub fn render_tokens(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return "(tokens will appear here)".dimmed().to_string();
    }
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let color = TOKEN_COLORS[i % TOKEN_COLORS.len()];
        out.push_str(&escape_token(token).color(color).to_string());
    }
    out
}

/// Render the word-grouped view: one colored box per word, with a token
/// count badge on words split across several sub-word tokens.
pub fn render_word_groups(mapping: &WordMapping) -> String {
    if mapping.spans.is_empty() {
        return "(no words)".dimmed().to_string();
    }
    let mut parts = Vec::with_capacity(mapping.spans.len());
    for (i, span) in mapping.spans.iter().enumerate() {
        let color = TOKEN_COLORS[i % TOKEN_COLORS.len()];
        let mut piece = span.word.color(color).to_string();
        if span.is_multi_token() {
            piece.push_str(&format!("[{}]", span.token_count()).dimmed().to_string());
        }
        parts.push(piece);
    }
    parts.join(" ")
}
