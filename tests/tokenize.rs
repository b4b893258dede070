//! Integration tests for text splitting.
//!
//! These tests verify the punctuation rules, the normalization modes and the
//! invariants every token sequence must satisfy.

use proptest::prelude::*;
use wordvocab::{Tokenizer, TokenizerConfig, TokenizerError};

fn tokenizer() -> Tokenizer {
    Tokenizer::with_defaults().unwrap()
}

/// Test the documented splitting examples.
#[test]
fn test_soft_separator_examples() {
    let tokenizer = tokenizer();
    assert_eq!(tokenizer.tokenize("end."), vec!["end", "."]);
    assert_eq!(tokenizer.tokenize("3.14"), vec!["3.14"]);
    assert_eq!(tokenizer.tokenize("don't stop."), vec!["don't", "stop", "."]);
}

/// Test that every hard punctuation character becomes its own token.
#[test]
fn test_hard_punctuation() {
    let tokenizer = tokenizer();
    let cases = vec![
        ("wow!", vec!["wow", "!"]),
        ("a+b=c", vec!["a", "+", "b", "=", "c"]),
        ("x/y", vec!["x", "/", "y"]),
        ("@user #tag", vec!["@", "user", "#", "tag"]),
        ("[1]{2}(3)", vec!["[", "1", "]", "{", "2", "}", "(", "3", ")"]),
        ("a\\b", vec!["a", "\\", "b"]),
        ("\"quoted\"", vec!["\"", "quoted", "\""]),
        ("snake_case", vec!["snake", "_", "case"]),
    ];

    for (text, expected) in cases {
        assert_eq!(tokenizer.tokenize(text), expected, "failed for: {:?}", text);
    }
}

/// Test separators that stay attached to their neighbors.
#[test]
fn test_attached_separators() {
    let tokenizer = tokenizer();
    assert_eq!(tokenizer.tokenize("1,000,000"), vec!["1,000,000"]);
    assert_eq!(tokenizer.tokenize("at 10:30 sharp"), vec!["at", "10:30", "sharp"]);
    assert_eq!(tokenizer.tokenize("the U.S. army"), vec!["the", "U.S", ".", "army"]);
    assert_eq!(tokenizer.tokenize("rock 'n roll"), vec!["rock", "'n", "roll"]);
}

/// Test separators that split.
#[test]
fn test_detached_separators() {
    let tokenizer = tokenizer();
    assert_eq!(
        tokenizer.tokenize("first, second: third."),
        vec!["first", ",", "second", ":", "third", "."]
    );
    // The first separator of a run absorbs its successor.
    assert_eq!(tokenizer.tokenize("wait..."), vec!["wait", "..", "."]);
}

/// Test that hyphenated words and dashes are never split.
#[test]
fn test_hyphen_never_split() {
    let tokenizer = tokenizer();
    assert_eq!(
        tokenizer.tokenize("a well-known, long-term plan"),
        vec!["a", "well-known", ",", "long-term", "plan"]
    );
    assert_eq!(tokenizer.tokenize("-5"), vec!["-5"]);
}

/// Test lowercasing combined with transliteration.
#[test]
fn test_lower_and_normalize() {
    let config = TokenizerConfig::new().with_lower(true).with_normalize(true);
    let tokenizer = Tokenizer::new(config).unwrap();
    assert_eq!(
        tokenizer.tokenize("ÉCOLE Über naïve"),
        vec!["ecole", "uber", "naive"]
    );
}

/// Test stripping of non-ASCII characters.
#[test]
fn test_remove_non_ascii_keeps_en_dash() {
    let config = TokenizerConfig::new().with_remove_non_ascii(true);
    let tokenizer = Tokenizer::new(config).unwrap();
    assert_eq!(
        tokenizer.tokenize("pages 10\u{2013}20 ✓ done"),
        vec!["pages", "10\u{2013}20", "done"]
    );
}

/// Test that the two normalization modes cannot be combined.
#[test]
fn test_normalize_conflict() {
    let config = TokenizerConfig::new()
        .with_normalize(true)
        .with_remove_non_ascii(true);
    let err = Tokenizer::new(config).unwrap_err();
    assert!(matches!(err, TokenizerError::Configuration(_)));
}

proptest! {
    #[test]
    fn prop_no_empty_tokens(text in "\\PC{0,64}") {
        let tokenizer = tokenizer();
        for token in tokenizer.tokenize(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn prop_hyphenated_words_survive(
        left in "[a-z]{1,8}",
        right in "[a-z]{1,8}",
        prefix in "[a-z ]{0,10}",
    ) {
        let tokenizer = tokenizer();
        let word = format!("{}-{}", left, right);
        let text = format!("{} {} .", prefix, word);
        prop_assert!(tokenizer.tokenize(&text).contains(&word));
    }

    #[test]
    fn prop_lower_is_idempotent(text in "[A-Za-z0-9 .,!?'-]{0,40}") {
        let tokenizer = Tokenizer::new(TokenizerConfig::new().with_lower(true)).unwrap();
        let once = tokenizer.tokenize(&text);
        let twice = tokenizer.tokenize(&once.join(" "));
        prop_assert_eq!(once, twice);
    }
}
