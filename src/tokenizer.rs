//! Token splitting using the o200k encoding
//!
//! Wraps tiktoken's `o200k_base` to produce the decoded string form of
//! every token, not just ids. The encoding tables ship with the crate, so
//! loading never touches the network.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use tiktoken_rs::CoreBPE;

/// Cached encoding instance; loading the ranks is expensive enough to do once
static BPE: Lazy<Option<CoreBPE>> = Lazy::new(|| tiktoken_rs::o200k_base().ok());

fn bpe() -> Result<&'static CoreBPE> {
    BPE.as_ref().ok_or_else(|| Error::Tokenization {
        message: "o200k encoding failed to load".into(),
    })
}

/// Count tokens in the text. Whitespace-only input counts as zero without
/// invoking the encoder.
pub fn count_tokens(text: &str) -> Result<usize> {
    if text.trim().is_empty() {
        return Ok(0);
    }
    Ok(bpe()?.encode_ordinary(text).len())
}

/// Split text into its ordered token strings.
///
/// Concatenating the returned strings reproduces the input exactly. A BPE
/// token can end mid-way through a multi-byte character; such ids are
/// grouped until they decode cleanly, with the earlier ids of the group
/// contributing empty strings and the last carrying the decoded text, so
/// both the token count and the concatenation stay faithful.
pub fn tokenize(text: &str) -> Result<Vec<String>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let bpe = bpe()?;
    let ids = bpe.encode_ordinary(text);

    let mut tokens = Vec::with_capacity(ids.len());
    let mut pending: Vec<usize> = Vec::new();
    for id in ids {
        pending.push(id);
        match bpe.decode(pending.clone()) {
            Ok(piece) => {
                for _ in 1..pending.len() {
                    tokens.push(String::new());
                }
                tokens.push(piece);
                pending.clear();
            }
            // Partial character; keep accumulating
            Err(_) => continue,
        }
    }

    if !pending.is_empty() {
        // The full sequence of a valid &str always decodes, so a leftover
        // group means the encoder and decoder disagree about the input.
        return Err(Error::Tokenization {
            message: format!("{} trailing token(s) did not decode", pending.len()),
        });
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_whitespace_only() {
        assert!(tokenize("   \n\t  ").unwrap().is_empty());
    }

    #[test]
    fn test_count_tokens_whitespace_only() {
        assert_eq!(count_tokens(" \n ").unwrap(), 0);
    }

    #[test]
    fn test_count_tokens_basic() {
        let count = count_tokens("Hello, world!").unwrap();
        assert!(count > 0);
        assert!(count < 10);
    }

    #[test]
    fn test_tokenize_lossless_ascii() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let tokens = tokenize(text).unwrap();
        assert_eq!(tokens.concat(), text);
    }

    #[test]
    fn test_tokenize_lossless_unicode() {
        let text = "héllo wörld — 世界と token 分割";
        let tokens = tokenize(text).unwrap();
        assert_eq!(tokens.concat(), text);
    }

    #[test]
    fn test_tokenize_lossless_emoji() {
        let text = "wave 👋 globe 🌍";
        let tokens = tokenize(text).unwrap();
        assert_eq!(tokens.concat(), text);
    }

    #[test]
    fn test_tokenize_count_matches_encoder() {
        let text = "Tokenization should preserve the raw token count";
        assert_eq!(tokenize(text).unwrap().len(), count_tokens(text).unwrap());
    }

    #[test]
    fn test_tokenize_multiline() {
        let text = "line one\nline two\ttabbed";
        let tokens = tokenize(text).unwrap();
        assert_eq!(tokens.concat(), text);
    }
}
