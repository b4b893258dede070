//! Core tokenization engine for wordvocab.
//!
//! This module contains the word-level tokenizer and its vocabulary:
//! - Punctuation-aware splitting of raw text into word tokens
//! - Optional lowercasing, ASCII transliteration or non-ASCII stripping
//! - A word↔index table with occurrence counts, pruned by frequency after training
//! - Encoding to index sequences and decoding back to tokens or text
//!
//! # Architecture
//!
//! - [`Tokenizer`]: Main tokenizer struct owning configuration, splitting rules and
//!   the vocabulary, with training/encoding/decoding API
//! - [`TokenizerConfig`]: Construction options and their validation
//! - [`Pretokenizer`]: Regex passes that split normalized text into tokens
//! - [`Vocab`]: Bijective word/index table with counts, reindexing and pruning
//! - [`Transliterate`]: Pluggable Unicode to ASCII conversion used by `normalize`
//!
//! # Error Model
//!
//! Unknown words are tolerated when encoding (they map to the unknown token) but
//! unknown indices are an error when decoding, as is removing a word that is not in
//! the vocabulary.

mod config;
mod normalize;
mod pretokenize;
mod tokenizer;
mod vocab;

pub use config::{SpecialTokens, TokenizerConfig, DEFAULT_MAX_VOCAB};
pub use normalize::{remove_non_ascii, Deunicode, Transliterate, EN_DASH};
pub use pretokenize::{Pretokenizer, PUNCTUATIONS, SOFT_SEPARATORS};
pub use tokenizer::{
    special_indices, Decoded, EncodeInput, Tokenizer, TokenizerError, TrainingSummary,
};
pub use vocab::{Vocab, VocabError, WordEntry};
