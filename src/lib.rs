//! wordvocab - word-level tokenizer with a bounded vocabulary
//!
//! Splits natural-language text into word and punctuation tokens, learns a
//! frequency-ranked vocabulary capped at `max_vocab` entries, and converts between
//! token sequences and index sequences.
//!
//! ```
//! use wordvocab::{special_indices, Tokenizer};
//!
//! let mut tokenizer = Tokenizer::with_defaults()?;
//! tokenizer.train(["Don't stop.", "Pi is 3.14, roughly."]);
//!
//! assert_eq!(tokenizer.tokenize("don't stop."), ["don't", "stop", "."]);
//! let ids = tokenizer.encode_text("Pi is unknown", false);
//! assert_eq!(ids[2], special_indices::UNK);
//! # Ok::<(), wordvocab::TokenizerError>(())
//! ```
//!
//! Python bindings are built with the `python` feature.

pub mod core;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{
    special_indices, Decoded, EncodeInput, SpecialTokens, Tokenizer, TokenizerConfig,
    TokenizerError, TrainingSummary, Vocab, VocabError,
};
