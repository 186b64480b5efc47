//! Token and word statistics
//!
//! Per-text counts plus the pure comparison between an original text and
//! its translation. The word count here is a plain whitespace split and is
//! computed independently of the aligner's word scan; the two can disagree
//! on punctuation-heavy input and are kept separate on purpose.

use serde::Serialize;

/// Count words by trimming and splitting on whitespace runs.
/// Whitespace-only input counts as zero.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Derived counts for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub token_count: usize,
    pub word_count: usize,
}

impl TextStats {
    pub fn new(token_count: usize, word_count: usize) -> Self {
        Self {
            token_count,
            word_count,
        }
    }

    /// Tokens per word. None when the text has no words; displayed as "-".
    pub fn ratio(&self) -> Option<f64> {
        if self.word_count == 0 {
            return None;
        }
        Some(self.token_count as f64 / self.word_count as f64)
    }
}

/// Which side of a comparison uses fewer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Efficiency {
    Original,
    Translation,
    Equal,
    Unknown,
}

impl Efficiency {
    pub fn label(&self) -> &'static str {
        match self {
            Efficiency::Original => "Original",
            Efficiency::Translation => "Translation",
            Efficiency::Equal => "Equal",
            Efficiency::Unknown => "-",
        }
    }
}

/// Relative metrics between an original and a comparison text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenComparison {
    pub token_delta: i64,
    /// Relative to the original's token count, rounded to one decimal.
    /// None when the original has no tokens.
    pub percent_delta: Option<f64>,
    pub word_delta: i64,
    pub more_efficient: Efficiency,
}

/// Compare two texts' stats. Pure; no state survives between calls.
pub fn compare(original: &TextStats, comparison: &TextStats) -> TokenComparison {
    let token_delta = comparison.token_count as i64 - original.token_count as i64;
    let word_delta = comparison.word_count as i64 - original.word_count as i64;

    let percent_delta = (original.token_count > 0)
        .then(|| (token_delta as f64 / original.token_count as f64 * 1000.0).round() / 10.0);

    let more_efficient = if original.token_count == 0 || comparison.token_count == 0 {
        Efficiency::Unknown
    } else if original.token_count < comparison.token_count {
        Efficiency::Original
    } else if comparison.token_count < original.token_count {
        Efficiency::Translation
    } else {
        Efficiency::Equal
    };

    TokenComparison {
        token_delta,
        percent_delta,
        word_delta,
        more_efficient,
    }
}

/// Signed display form: "+3", "-3", "0".
pub fn format_signed(n: i64) -> String {
    if n > 0 {
        format!("+{n}")
    } else {
        n.to_string()
    }
}

/// Ratio display form: "1.50", or "-" when undefined.
pub fn format_ratio(stats: &TextStats) -> String {
    match stats.ratio() {
        Some(r) => format!("{r:.2}"),
        None => "-".to_string(),
    }
}

/// Percent-delta display form: "+12.5%", "-30.0%", or "-" when undefined.
pub fn format_percent(comparison: &TokenComparison) -> String {
    match comparison.percent_delta {
        Some(p) if p > 0.0 => format!("+{p:.1}%"),
        Some(p) => format!("{p:.1}%"),
        None => "-".to_string(),
    }
}
