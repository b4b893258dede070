//! Python bindings for the wordvocab tokenizer.
//!
//! This module provides PyO3 wrappers around the core Rust tokenizer,
//! exposing a Python-friendly API while keeping the work in Rust.
//!
//! # Error Mapping
//!
//! - invalid configuration and unknown words raise `ValueError`
//! - unknown indices raise `KeyError`
//!
//! # Example
//!
//! ```python
//! from wordvocab import Tokenizer
//!
//! tokenizer = Tokenizer(max_vocab=10_000, lower=True)
//! tokenizer.train_tokenizer(["The cat sat.", "The dog ran!"])
//!
//! ids = tokenizer.encode(["the cat ran."], use_eos_bos_token=True)
//! text = tokenizer.decode(ids, to_string=True)
//! ```

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyList;
use rustc_hash::FxHashMap;

use crate::core::{
    Decoded, SpecialTokens, Tokenizer, TokenizerConfig, TokenizerError, VocabError,
    DEFAULT_MAX_VOCAB,
};

/// Convert a tokenizer error into the matching Python exception.
fn to_py_err(err: TokenizerError) -> PyErr {
    match err {
        TokenizerError::Vocab(VocabError::UnknownIndex(index)) => PyKeyError::new_err(index),
        other => PyValueError::new_err(other.to_string()),
    }
}

/// Accept either one string or a sequence of strings.
fn extract_texts(text: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    if let Ok(single) = text.extract::<String>() {
        return Ok(vec![single]);
    }
    text.extract()
}

/// Python wrapper for the Rust Tokenizer.
#[pyclass(name = "Tokenizer")]
pub struct PyTokenizer {
    inner: Tokenizer,
}

#[pymethods]
impl PyTokenizer {
    /// Create a new tokenizer holding only the four special tokens.
    ///
    /// Args:
    ///     max_vocab: Vocabulary size cap applied after training
    ///     lower: Lowercase text before tokenizing
    ///     normalize: Transliterate non-ASCII characters to ASCII
    ///     remove_non_ascii: Drop non-ASCII characters (exclusive with normalize)
    ///     pad_token, unk_token, bos_token, eos_token: Special token strings
    ///
    /// Raises:
    ///     ValueError: If normalize and remove_non_ascii are both set
    #[new]
    #[pyo3(signature = (
        max_vocab=DEFAULT_MAX_VOCAB,
        lower=false,
        normalize=false,
        remove_non_ascii=false,
        pad_token="<PAD>",
        unk_token="<UNK>",
        bos_token="<BOS>",
        eos_token="<EOS>"
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        max_vocab: usize,
        lower: bool,
        normalize: bool,
        remove_non_ascii: bool,
        pad_token: &str,
        unk_token: &str,
        bos_token: &str,
        eos_token: &str,
    ) -> PyResult<Self> {
        let config = TokenizerConfig::new()
            .with_max_vocab(max_vocab)
            .with_lower(lower)
            .with_normalize(normalize)
            .with_remove_non_ascii(remove_non_ascii)
            .with_special_tokens(SpecialTokens::new(
                pad_token, unk_token, bos_token, eos_token,
            ));

        let inner = Tokenizer::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Train the vocabulary on a string or a list of strings.
    ///
    /// Returns:
    ///     Number of words removed to respect max_vocab
    fn train_tokenizer(&mut self, text: &Bound<'_, PyAny>) -> PyResult<usize> {
        let texts = extract_texts(text)?;
        let summary = self.inner.train(&texts);
        Ok(summary.pruned.len())
    }

    /// Split text into tokens.
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.inner.tokenize(text)
    }

    /// Split text into tokens, keeping literal special tokens whole.
    fn tokenize_with_special(&self, text: &str) -> Vec<String> {
        self.inner.tokenize_with_special(text)
    }

    /// Encode a list of texts or token lists to index lists.
    ///
    /// Args:
    ///     texts: List whose items are either str or list[str]
    ///     use_eos_bos_token: Wrap each sequence in the begin/end indices
    ///
    /// Returns:
    ///     List of index lists, one per input
    #[pyo3(signature = (texts, use_eos_bos_token=false))]
    fn encode<'py>(
        &self,
        texts: Vec<Bound<'py, PyAny>>,
        use_eos_bos_token: bool,
    ) -> PyResult<Vec<Vec<u32>>> {
        texts
            .iter()
            .map(|item| {
                if let Ok(text) = item.extract::<String>() {
                    Ok(self.inner.encode_text(&text, use_eos_bos_token))
                } else {
                    let tokens: Vec<String> = item.extract()?;
                    Ok(self.inner.encode_tokens(&tokens, use_eos_bos_token))
                }
            })
            .collect()
    }

    /// Encode text, mapping literal special tokens to their own indices.
    #[pyo3(signature = (text, use_eos_bos_token=false))]
    fn encode_with_special(&self, text: &str, use_eos_bos_token: bool) -> Vec<u32> {
        self.inner.encode_with_special(text, use_eos_bos_token)
    }

    /// Batch encode raw texts in parallel.
    #[pyo3(signature = (texts, use_eos_bos_token=false))]
    fn encode_batch(&self, texts: Vec<String>, use_eos_bos_token: bool) -> Vec<Vec<u32>> {
        self.inner.encode_batch(&texts, use_eos_bos_token)
    }

    /// Decode index lists back to tokens.
    ///
    /// Args:
    ///     list_of_tokens: List of index lists
    ///     to_string: Join each decoded list with single spaces
    ///
    /// Raises:
    ///     KeyError: If an index is not in the vocabulary
    #[pyo3(signature = (list_of_tokens, to_string=false))]
    fn decode<'py>(
        &self,
        py: Python<'py>,
        list_of_tokens: Vec<Vec<u32>>,
        to_string: bool,
    ) -> PyResult<Bound<'py, PyList>> {
        let decoded = self
            .inner
            .decode(&list_of_tokens, to_string)
            .map_err(to_py_err)?;

        let output = PyList::empty(py);
        for item in decoded {
            match item {
                Decoded::Text(text) => output.append(text)?,
                Decoded::Tokens(tokens) => output.append(tokens)?,
            }
        }
        Ok(output)
    }

    /// Batch decode index lists to strings in parallel.
    fn decode_batch(&self, list_of_tokens: Vec<Vec<u32>>) -> PyResult<Vec<String>> {
        self.inner.decode_batch(&list_of_tokens).map_err(to_py_err)
    }

    /// Add one occurrence of a word; returns its index.
    fn add_word(&mut self, word: &str) -> u32 {
        self.inner.add_word(word)
    }

    fn add_words(&mut self, list_of_words: Vec<String>) {
        self.inner.add_words(&list_of_words);
    }

    /// Remove a word. Special tokens are silently kept.
    ///
    /// Raises:
    ///     ValueError: If the word is not in the vocabulary
    #[pyo3(signature = (word, reindex=false))]
    fn remove_word(&mut self, word: &str, reindex: bool) -> PyResult<()> {
        self.inner.remove_word(word, reindex).map_err(to_py_err)
    }

    /// Remove several words, reindexing once at the end if requested.
    #[pyo3(signature = (list_of_words, reindex=false))]
    fn remove_words(&mut self, list_of_words: Vec<String>, reindex: bool) -> PyResult<()> {
        self.inner
            .remove_words(&list_of_words, reindex)
            .map_err(to_py_err)
    }

    /// Renumber the vocabulary densely from 0.
    fn reindex(&mut self) {
        self.inner.reindex();
    }

    /// Number of words in the vocabulary (including special tokens).
    #[getter]
    fn n_words(&self) -> usize {
        self.inner.vocab_size()
    }

    #[getter]
    fn max_vocab(&self) -> usize {
        self.inner.config().max_vocab
    }

    #[getter]
    fn word2index(&self) -> FxHashMap<String, u32> {
        self.inner
            .vocab()
            .encoder()
            .iter()
            .map(|(word, entry)| (word.clone(), entry.index))
            .collect()
    }

    #[getter]
    fn word2count(&self) -> FxHashMap<String, u64> {
        self.inner
            .vocab()
            .encoder()
            .iter()
            .map(|(word, entry)| (word.clone(), entry.count))
            .collect()
    }

    #[getter]
    fn index2word(&self) -> FxHashMap<u32, String> {
        self.inner.vocab().decoder().clone()
    }

    /// The `n` most frequent words with their counts.
    fn most_common(&self, n: usize) -> Vec<(String, u64)> {
        self.inner
            .vocab()
            .most_common(n)
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect()
    }

    #[getter]
    fn pad_token(&self) -> &str {
        self.inner.pad_token()
    }

    #[getter]
    fn unk_token(&self) -> &str {
        self.inner.unk_token()
    }

    #[getter]
    fn bos_token(&self) -> &str {
        self.inner.bos_token()
    }

    #[getter]
    fn eos_token(&self) -> &str {
        self.inner.eos_token()
    }

    /// String representation.
    fn __repr__(&self) -> String {
        format!(
            "Tokenizer(n_words={}, max_vocab={})",
            self.inner.vocab_size(),
            self.inner.config().max_vocab
        )
    }
}
