//! Tokenizer configuration.
//!
//! A [`TokenizerConfig`] is built with consuming `with_*` methods and checked once,
//! when it is handed to [`Tokenizer::new`](super::Tokenizer::new). After that it is
//! read-only.

use std::fmt;
use std::sync::Arc;

use super::normalize::{Deunicode, Transliterate};
use super::tokenizer::TokenizerError;

/// Default upper bound on the vocabulary size after training.
pub const DEFAULT_MAX_VOCAB: usize = 50_000;

/// The reserved tokens inserted at indices 0-3 of every vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    pub pad: String,
    pub unk: String,
    pub bos: String,
    pub eos: String,
}

impl SpecialTokens {
    pub fn new(
        pad: impl Into<String>,
        unk: impl Into<String>,
        bos: impl Into<String>,
        eos: impl Into<String>,
    ) -> Self {
        Self {
            pad: pad.into(),
            unk: unk.into(),
            bos: bos.into(),
            eos: eos.into(),
        }
    }

    /// Special tokens in index order: pad, unk, bos, eos.
    pub fn as_array(&self) -> [&str; 4] {
        [&self.pad, &self.unk, &self.bos, &self.eos]
    }

    /// Whether `word` is one of the four reserved tokens.
    pub fn contains(&self, word: &str) -> bool {
        self.as_array().contains(&word)
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self::new("<PAD>", "<UNK>", "<BOS>", "<EOS>")
    }
}

/// Construction options for [`Tokenizer`](super::Tokenizer).
///
/// `normalize` and `remove_non_ascii` are mutually exclusive.
#[derive(Clone)]
pub struct TokenizerConfig {
    /// Upper bound on the vocabulary size, applied at the end of training.
    pub max_vocab: usize,
    /// Lowercase input before splitting.
    pub lower: bool,
    /// Transliterate non-ASCII characters to ASCII.
    pub normalize: bool,
    /// Drop non-ASCII characters (the en-dash is kept).
    pub remove_non_ascii: bool,
    pub special_tokens: SpecialTokens,
    transliterator: Arc<dyn Transliterate>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_vocab: DEFAULT_MAX_VOCAB,
            lower: false,
            normalize: false,
            remove_non_ascii: false,
            special_tokens: SpecialTokens::default(),
            transliterator: Arc::new(Deunicode),
        }
    }
}

impl fmt::Debug for TokenizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenizerConfig")
            .field("max_vocab", &self.max_vocab)
            .field("lower", &self.lower)
            .field("normalize", &self.normalize)
            .field("remove_non_ascii", &self.remove_non_ascii)
            .field("special_tokens", &self.special_tokens)
            .finish_non_exhaustive()
    }
}

impl TokenizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_vocab(self, max_vocab: usize) -> Self {
        Self { max_vocab, ..self }
    }

    pub fn with_lower(self, lower: bool) -> Self {
        Self { lower, ..self }
    }

    pub fn with_normalize(self, normalize: bool) -> Self {
        Self { normalize, ..self }
    }

    pub fn with_remove_non_ascii(self, remove_non_ascii: bool) -> Self {
        Self {
            remove_non_ascii,
            ..self
        }
    }

    pub fn with_special_tokens(self, special_tokens: SpecialTokens) -> Self {
        Self {
            special_tokens,
            ..self
        }
    }

    /// Replace the transliteration used when `normalize` is set.
    pub fn with_transliterator<T>(self, transliterator: T) -> Self
    where
        T: Transliterate + 'static,
    {
        Self {
            transliterator: Arc::new(transliterator),
            ..self
        }
    }

    pub fn transliterator(&self) -> &dyn Transliterate {
        self.transliterator.as_ref()
    }

    /// Check the option combination.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] when both normalization modes are set,
    /// `max_vocab` is zero, or a special token is empty or repeated.
    pub fn validate(&self) -> Result<(), TokenizerError> {
        if self.normalize && self.remove_non_ascii {
            return Err(TokenizerError::Configuration(
                "normalize and remove_non_ascii are mutually exclusive".to_string(),
            ));
        }
        if self.max_vocab == 0 {
            return Err(TokenizerError::Configuration(
                "max_vocab must be positive".to_string(),
            ));
        }

        let specials = self.special_tokens.as_array();
        for (i, token) in specials.iter().enumerate() {
            if token.is_empty() {
                return Err(TokenizerError::Configuration(
                    "special tokens must not be empty".to_string(),
                ));
            }
            if specials[..i].contains(token) {
                return Err(TokenizerError::Configuration(format!(
                    "special token {:?} is used more than once",
                    token
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TokenizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_vocab, DEFAULT_MAX_VOCAB);
        assert_eq!(
            config.special_tokens.as_array(),
            ["<PAD>", "<UNK>", "<BOS>", "<EOS>"]
        );
    }

    #[test]
    fn test_normalize_and_remove_non_ascii_conflict() {
        let config = TokenizerConfig::new()
            .with_normalize(true)
            .with_remove_non_ascii(true);
        assert!(matches!(
            config.validate(),
            Err(TokenizerError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_max_vocab_rejected() {
        let config = TokenizerConfig::new().with_max_vocab(0);
        assert!(matches!(
            config.validate(),
            Err(TokenizerError::Configuration(_))
        ));
    }

    #[test]
    fn test_duplicate_special_tokens_rejected() {
        let config = TokenizerConfig::new()
            .with_special_tokens(SpecialTokens::new("<PAD>", "<PAD>", "<BOS>", "<EOS>"));
        assert!(config.validate().is_err());

        let config =
            TokenizerConfig::new().with_special_tokens(SpecialTokens::new("", "u", "b", "e"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_special_tokens_contains() {
        let specials = SpecialTokens::default();
        assert!(specials.contains("<UNK>"));
        assert!(!specials.contains("UNK"));
    }
}
