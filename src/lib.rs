//! token-lens: visualize LLM tokenization and compare translation
//! token efficiency.
//!
//! The core pipeline is pure and synchronous: text goes through the
//! [`tokenizer`] into ordered token strings, the [`aligner`] maps each
//! whitespace-delimited word onto the run of tokens composing it, and the
//! [`stats`] engine derives counts and cross-text comparisons. The
//! [`translator`] is the single asynchronous collaborator. The binary owns
//! one mutable [`session::Session`] and everything else operates on
//! snapshots.

pub mod aligner;
pub mod config;
pub mod detector;
pub mod error;
pub mod output;
pub mod render;
pub mod security;
pub mod session;
pub mod stats;
pub mod tokenizer;
pub mod translator;

pub use error::{Error, Result};
