//! Word-token alignment
//!
//! Tokenizers and whitespace agree on nothing: a token may carry a leading
//! space, cover half a word, or span a word boundary. This module merges
//! the two partitions of the same character stream back together, mapping
//! each whitespace-delimited word onto the contiguous run of tokens that
//! composes it. The merge is one-pass and strictly monotonic over both the
//! character cursor and the token index.

use serde::Serialize;

/// One whitespace-delimited word and the token positions composing it.
///
/// Offsets are char offsets into the text the tokens were produced from.
/// Token positions index into that text's token sequence and are
/// contiguous; no position appears in more than one span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSpan {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub token_indices: Vec<usize>,
}

impl WordSpan {
    pub fn token_count(&self) -> usize {
        self.token_indices.len()
    }

    /// Words split across several sub-word tokens get a count badge in the
    /// rendered view.
    pub fn is_multi_token(&self) -> bool {
        self.token_indices.len() > 1
    }
}

/// Ordered word spans for one text plus a token-position → owning-span
/// lookup. Consumed by rendering only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMapping {
    pub spans: Vec<WordSpan>,
    #[serde(skip)]
    token_owner: Vec<Option<usize>>,
}

impl WordMapping {
    pub fn new(spans: Vec<WordSpan>, token_count: usize) -> Self {
        let mut token_owner = vec![None; token_count];
        for (span_idx, span) in spans.iter().enumerate() {
            for &tok in &span.token_indices {
                if let Some(slot) = token_owner.get_mut(tok) {
                    *slot = Some(span_idx);
                }
            }
        }
        Self { spans, token_owner }
    }

    /// Align `tokens` against `text` and build the lookup in one go.
    pub fn build(text: &str, tokens: &[String]) -> Self {
        Self::new(align(text, tokens), tokens.len())
    }

    /// Index of the span owning this token position, if any. Tokens past
    /// the last word (trailing whitespace) have no owner.
    pub fn owner_of(&self, token_index: usize) -> Option<usize> {
        self.token_owner.get(token_index).copied().flatten()
    }
}

/// Map each word of `text` onto the run of tokens that composes it.
///
/// Walks the words left to right while consuming tokens greedily: a word
/// keeps taking tokens until the cumulative decoded length reaches its end
/// offset. A token straddling a word boundary therefore attaches to the
/// word being closed out, and a word whose characters were already covered
/// by an earlier word's tokens consumes nothing and is dropped.
pub fn align(text: &str, tokens: &[String]) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut tok = 0usize;
    let mut cursor = 0usize;

    for (start, end, word) in words(text) {
        let mut token_indices = Vec::new();
        while cursor < end && tok < tokens.len() {
            cursor += tokens[tok].chars().count();
            token_indices.push(tok);
            tok += 1;
        }
        if token_indices.is_empty() {
            continue;
        }
        spans.push(WordSpan {
            word,
            start,
            end,
            token_indices,
        });
    }

    spans
}

/// Maximal non-whitespace runs with their char offsets, left to right.
fn words(text: &str) -> Vec<(usize, usize, String)> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut current = String::new();
    let mut idx = 0usize;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                out.push((start, idx, std::mem::take(&mut current)));
            }
        } else {
            if current.is_empty() {
                start = idx;
            }
            current.push(ch);
        }
        idx += 1;
    }
    if !current.is_empty() {
        out.push((start, idx, current));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_words_two_tokens() {
        let spans = align("Hello world", &toks(&["Hello", " world"]));
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].word, "Hello");
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, 5);
        assert_eq!(spans[0].token_indices, vec![0]);
        assert_eq!(spans[1].word, "world");
        assert_eq!(spans[1].start, 6);
        assert_eq!(spans[1].end, 11);
        assert_eq!(spans[1].token_indices, vec![1]);
    }

    #[test]
    fn test_single_word_many_tokens() {
        let spans = align(
            "antidisestablishmentarianism",
            &toks(&["anti", "dis", "establishment", "arianism"]),
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].token_indices, vec![0, 1, 2, 3]);
        assert!(spans[0].is_multi_token());
        assert_eq!(spans[0].token_count(), 4);
    }

    #[test]
    fn test_straddling_token_attaches_to_earlier_word() {
        // "Hello " covers the first word and the boundary space
        let spans = align("Hello world", &toks(&["Hello ", "world"]));
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].token_indices, vec![0]);
        assert_eq!(spans[1].token_indices, vec![1]);
    }

    #[test]
    fn test_word_fully_covered_by_earlier_consumption_is_dropped() {
        // A single token covering both words: the second word can consume
        // nothing and is dropped rather than emitted empty.
        let spans = align("a b", &toks(&["a b"]));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].word, "a");
        assert_eq!(spans[0].token_indices, vec![0]);
    }

    #[test]
    fn test_no_tokens_no_spans() {
        assert!(align("some words here", &[]).is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(align("", &toks(&["x"])).is_empty());
    }

    #[test]
    fn test_leading_and_trailing_whitespace() {
        let spans = align("  hi  ", &toks(&["  ", "hi", "  "]));
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].word, "hi");
        assert_eq!(spans[0].start, 2);
        assert_eq!(spans[0].end, 4);
        // Leading whitespace token is swallowed by the first word's scan;
        // the trailing one belongs to no word.
        assert_eq!(spans[0].token_indices, vec![0, 1]);
    }

    #[test]
    fn test_token_indices_monotonic_and_unique() {
        let text = "one two three four five";
        let tokens = toks(&["one", " two", " thr", "ee", " four", " ", "five"]);
        let spans = align(text, &tokens);
        let all: Vec<usize> = spans.iter().flat_map(|s| s.token_indices.clone()).collect();
        for pair in all.windows(2) {
            assert!(pair[0] < pair[1], "token indices must be strictly increasing");
        }
    }

    #[test]
    fn test_span_char_coverage() {
        let text = "alpha beta gamma";
        let tokens = toks(&["al", "pha", " be", "ta", " gam", "ma"]);
        let spans = align(text, &tokens);
        assert_eq!(spans.len(), 3);
        // Each span's tokens, concatenated, must cover through the word's end
        let mut consumed = 0usize;
        for span in &spans {
            for &i in &span.token_indices {
                consumed += tokens[i].chars().count();
            }
            assert!(consumed >= span.end);
        }
    }

    #[test]
    fn test_multibyte_offsets_are_char_based() {
        let spans = align("héllo wörld", &toks(&["héllo", " wörld"]));
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].start, 6);
        assert_eq!(spans[1].end, 11);
    }

    #[test]
    fn test_mapping_owner_lookup() {
        let tokens = toks(&["Hello", " wor", "ld", " "]);
        let mapping = WordMapping::build("Hello world ", &tokens);
        assert_eq!(mapping.spans.len(), 2);
        assert_eq!(mapping.owner_of(0), Some(0));
        assert_eq!(mapping.owner_of(1), Some(1));
        assert_eq!(mapping.owner_of(2), Some(1));
        // Trailing whitespace token belongs to no word
        assert_eq!(mapping.owner_of(3), None);
        // Out of range is None, not a panic
        assert_eq!(mapping.owner_of(99), None);
    }

    #[test]
    fn test_mapping_serializes_spans_only() {
        let mapping = WordMapping::build("hi", &toks(&["hi"]));
        let json = serde_json::to_value(&mapping).unwrap();
        assert!(json.get("spans").is_some());
        assert!(json.get("tokenOwner").is_none());
    }
}
