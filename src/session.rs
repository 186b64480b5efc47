//! Document session state
//!
//! The presentation layer owns exactly one `Session`; the core never holds
//! state of its own. Each side of the session is a snapshot recomputed
//! wholesale from the current text, so an edit can never observe a
//! partially updated view.

use crate::aligner::WordMapping;
use crate::detector::{self, Detection};
use crate::error::Result;
use crate::stats::{self, TextStats, TokenComparison};
use crate::tokenizer;
use serde::Serialize;

/// Everything derived from one text: tokens, word mapping, counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub text: String,
    pub tokens: Vec<String>,
    pub mapping: WordMapping,
    pub stats: TextStats,
}

/// Run the full pipeline over one text: tokenize, align, count.
pub fn analyze(text: &str) -> Result<Analysis> {
    let tokens = tokenizer::tokenize(text)?;
    let mapping = WordMapping::build(text, &tokens);
    let stats = TextStats::new(tokens.len(), stats::word_count(text));
    Ok(Analysis {
        text: text.to_string(),
        tokens,
        mapping,
        stats,
    })
}

/// The live pair of documents: the user's input and its translation.
#[derive(Debug, Default)]
pub struct Session {
    original: Option<Analysis>,
    comparison: Option<Analysis>,
    detection: Detection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the original document and rerun detection. On failure the
    /// side is cleared; the next edit recomputes from scratch.
    pub fn set_original(&mut self, text: &str) -> Result<&Analysis> {
        self.detection = detector::detect(text);
        let analysis = match analyze(text) {
            Ok(a) => a,
            Err(e) => {
                self.original = None;
                return Err(e);
            }
        };
        Ok(self.original.insert(analysis))
    }

    /// Replace the comparison document (the translated text).
    pub fn set_comparison(&mut self, text: &str) -> Result<&Analysis> {
        let analysis = match analyze(text) {
            Ok(a) => a,
            Err(e) => {
                self.comparison = None;
                return Err(e);
            }
        };
        Ok(self.comparison.insert(analysis))
    }

    /// Reset the comparison side, e.g. after a failed translation.
    pub fn clear_comparison(&mut self) {
        self.comparison = None;
    }

    pub fn original(&self) -> Option<&Analysis> {
        self.original.as_ref()
    }

    pub fn comparison(&self) -> Option<&Analysis> {
        self.comparison.as_ref()
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Relative metrics between the two sides. An absent side counts as
    /// zero; None only when both sides are empty.
    pub fn comparison_stats(&self) -> Option<TokenComparison> {
        let original = self.original.as_ref().map(|a| a.stats).unwrap_or_default();
        let comparison = self.comparison.as_ref().map(|a| a.stats).unwrap_or_default();
        if original.token_count == 0 && comparison.token_count == 0 {
            return None;
        }
        Some(stats::compare(&original, &comparison))
    }
}
