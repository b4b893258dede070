mod bindings;

use crate::core::{DEFAULT_MAX_VOCAB, PUNCTUATIONS, SOFT_SEPARATORS};
pub use bindings::PyTokenizer;

use pyo3::prelude::*;

/// wordvocab - word-level tokenizer with Python bindings
///
/// Features:
/// - Punctuation-aware splitting that keeps numbers, contractions and hyphenated words
/// - Optional lowercasing, ASCII transliteration or non-ASCII stripping
/// - Frequency-ranked vocabulary capped at `max_vocab`
/// - Rayon parallelism for batch encoding and decoding
/// - Aho-Corasick matching of literal special tokens
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTokenizer>()?;
    m.add("DEFAULT_MAX_VOCAB", DEFAULT_MAX_VOCAB)?;
    m.add("PUNCTUATIONS", PUNCTUATIONS)?;
    m.add("SOFT_SEPARATORS", SOFT_SEPARATORS)?;
    Ok(())
}
