//! Punctuation-aware splitting of normalized text into word tokens.
//!
//! Splitting runs in three passes over the text:
//!
//! 1. Every character of [`PUNCTUATIONS`] is surrounded by spaces, so each one
//!    becomes a token of its own.
//! 2. A soft separator (one of [`SOFT_SEPARATORS`]) that is followed by anything
//!    other than an ASCII letter or digit, or that ends the text, gets a space
//!    inserted before it. Separators inside `3.14`, `don't` or `U.S` stay attached.
//! 3. The result is split on whitespace.
//!
//! The hyphen belongs to neither set, so hyphenated words are never split.
//!
//! # Example
//!
//! ```text
//! "Hello, world (again)."  ->  ["Hello", ",", "world", "(", "again", ")", "."]
//! ```

use regex::Regex;

use super::tokenizer::TokenizerError;

/// Characters that always form a token on their own.
pub const PUNCTUATIONS: &str = "!\"#$%&()*+/;<=>@?[\\]^_`{|}~";

/// Characters that split only when not followed by an ASCII alphanumeric.
pub const SOFT_SEPARATORS: &str = "'.,:";

const PUNCTUATION_PATTERN: &str = r##"[!"#$%\&()*+/;<=>@?\[\\\]^_`{|}\~]"##;
const SOFT_SEPARATOR_PATTERN: &str = r"[',.:](?:[^a-zA-Z0-9]|$)";

/// Compiled splitting rules.
#[derive(Debug, Clone)]
pub struct Pretokenizer {
    punctuation: Regex,
    soft_separator: Regex,
}

impl Pretokenizer {
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self {
            punctuation: Regex::new(PUNCTUATION_PATTERN)?,
            soft_separator: Regex::new(SOFT_SEPARATOR_PATTERN)?,
        })
    }

    /// Split already-normalized text into tokens. Never yields empty tokens.
    pub fn split(&self, text: &str) -> Vec<String> {
        let spaced = self.punctuation.replace_all(text, " ${0} ");
        // Non-overlapping: in "a..b" only the first '.' is detached, as one "..b" run.
        let separated = self.soft_separator.replace_all(&spaced, " ${0}");
        separated.split_whitespace().map(str::to_string).collect()
    }
}
