use aho_corasick::AhoCorasick;
use rayon::prelude::*;
use thiserror::Error;

use super::config::TokenizerConfig;
use super::normalize::remove_non_ascii;
use super::pretokenize::Pretokenizer;
use super::vocab::{Vocab, VocabError};

#[derive(Error, Debug)]
pub enum TokenizerError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Vocabulary error: {0}")]
    Vocab(#[from] VocabError),
    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Aho-Corasick build error: {0}")]
    AhoCorasick(#[from] aho_corasick::BuildError),
}

/// Fixed indices of the special tokens.
///
/// Special tokens are inserted first and can never be removed, and both
/// reindexing and pruning keep them ahead of every other word, so they hold
/// indices 0-3 for the lifetime of a [`Tokenizer`].
pub mod special_indices {
    pub const PAD: u32 = 0;
    pub const UNK: u32 = 1;
    pub const BOS: u32 = 2;
    pub const EOS: u32 = 3;

    /// Number of special tokens.
    pub const COUNT: usize = 4;
}

/// One element of an [`encode`](Tokenizer::encode) batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeInput<'a> {
    /// Raw text, tokenized before lookup.
    Text(&'a str),
    /// Tokens used as-is.
    Tokens(Vec<&'a str>),
}

impl<'a> From<&'a str> for EncodeInput<'a> {
    fn from(text: &'a str) -> Self {
        EncodeInput::Text(text)
    }
}

impl<'a> From<&'a String> for EncodeInput<'a> {
    fn from(text: &'a String) -> Self {
        EncodeInput::Text(text)
    }
}

impl<'a> From<&'a [String]> for EncodeInput<'a> {
    fn from(tokens: &'a [String]) -> Self {
        EncodeInput::Tokens(tokens.iter().map(String::as_str).collect())
    }
}

impl<'a> From<&'a Vec<String>> for EncodeInput<'a> {
    fn from(tokens: &'a Vec<String>) -> Self {
        tokens.as_slice().into()
    }
}

impl<'a> From<&'a [&'a str]> for EncodeInput<'a> {
    fn from(tokens: &'a [&'a str]) -> Self {
        EncodeInput::Tokens(tokens.to_vec())
    }
}

impl<'a> From<&'a Vec<&'a str>> for EncodeInput<'a> {
    fn from(tokens: &'a Vec<&'a str>) -> Self {
        EncodeInput::Tokens(tokens.clone())
    }
}

/// One element of a [`decode`](Tokenizer::decode) result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Words joined with single spaces.
    Text(String),
    Tokens(Vec<String>),
}

impl Decoded {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Decoded::Text(text) => Some(text),
            Decoded::Tokens(_) => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            Decoded::Text(_) => None,
            Decoded::Tokens(tokens) => Some(tokens),
        }
    }
}

/// Outcome of a [`train`](Tokenizer::train) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    /// Tokens produced from the corpus.
    pub tokens_seen: usize,
    /// Words that were not in the vocabulary before this call.
    pub words_added: usize,
    /// Words dropped to respect `max_vocab`, most frequent first.
    pub pruned: Vec<String>,
}

/// Word-level tokenizer with a trainable, size-bounded vocabulary.
///
/// # Lifecycle
///
/// A new tokenizer knows only its four special tokens (pad, unknown, begin, end at
/// indices 0-3). [`train`](Self::train) tokenizes a corpus, counts every token and
/// then prunes the least frequent words so that the vocabulary holds at most
/// `max_vocab` entries. Encoding and decoding never modify the vocabulary.
///
/// # Example
///
/// ```
/// use wordvocab::{Tokenizer, TokenizerConfig};
///
/// let mut tokenizer = Tokenizer::new(TokenizerConfig::new().with_lower(true))?;
/// tokenizer.train(["The cat sat.", "The dog ran!"]);
///
/// let ids = tokenizer.encode(["the cat ran."], true);
/// let text = tokenizer.decode_string(&ids[0])?;
/// assert_eq!(text, "<BOS> the cat ran . <EOS>");
/// # Ok::<(), wordvocab::TokenizerError>(())
/// ```
///
/// # Threading
///
/// Mutating methods take `&mut self`. Read-only methods take `&self` and the type
/// is `Send + Sync`; [`encode_batch`](Self::encode_batch) and
/// [`decode_batch`](Self::decode_batch) spread work across the Rayon pool.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    pretokenizer: Pretokenizer,
    special_matcher: AhoCorasick,
    vocab: Vocab,
}

impl Tokenizer {
    /// Create a tokenizer whose vocabulary holds only the special tokens.
    ///
    /// # Errors
    /// [`TokenizerError::Configuration`] if the configuration is invalid.
    pub fn new(config: TokenizerConfig) -> Result<Self, TokenizerError> {
        config.validate()?;

        let pretokenizer = Pretokenizer::new()?;
        let special_matcher = AhoCorasick::builder()
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(config.special_tokens.as_array())?;

        let mut vocab = Vocab::new();
        for token in config.special_tokens.as_array() {
            vocab.insert_protected(token);
        }

        log::debug!(
            "tokenizer created: max_vocab={}, lower={}, normalize={}, remove_non_ascii={}",
            config.max_vocab,
            config.lower,
            config.normalize,
            config.remove_non_ascii
        );

        Ok(Self {
            config,
            pretokenizer,
            special_matcher,
            vocab,
        })
    }

    /// Create a tokenizer with [`TokenizerConfig::default`].
    pub fn with_defaults() -> Result<Self, TokenizerError> {
        Self::new(TokenizerConfig::default())
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// Number of words in the vocabulary, special tokens included.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn pad_token(&self) -> &str {
        &self.config.special_tokens.pad
    }

    pub fn unk_token(&self) -> &str {
        &self.config.special_tokens.unk
    }

    pub fn bos_token(&self) -> &str {
        &self.config.special_tokens.bos
    }

    pub fn eos_token(&self) -> &str {
        &self.config.special_tokens.eos
    }

    // -------------------------------------------------------------------------
    // Tokenization
    // -------------------------------------------------------------------------

    /// Apply case folding and the configured Unicode handling.
    fn normalize_text(&self, text: &str) -> String {
        let text = if self.config.lower {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        if self.config.normalize {
            self.config.transliterator().transliterate(&text)
        } else if self.config.remove_non_ascii {
            remove_non_ascii(&text)
        } else {
            text
        }
    }

    /// Split text into word and punctuation tokens.
    ///
    /// The transformation is lossy: joining the tokens does not give back the
    /// original spacing or casing.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = self.normalize_text(text);
        self.pretokenizer.split(&normalized)
    }

    /// Tokenize, keeping literal special tokens (e.g. `<BOS>`) whole.
    ///
    /// Special tokens are matched in the raw text before any normalization; the
    /// text between them is tokenized as usual.
    pub fn tokenize_with_special(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut last_end = 0;

        for m in self.special_matcher.find_iter(text) {
            if m.start() > last_end {
                tokens.extend(self.tokenize(&text[last_end..m.start()]));
            }
            tokens.push(text[m.start()..m.end()].to_string());
            last_end = m.end();
        }

        if last_end < text.len() {
            tokens.extend(self.tokenize(&text[last_end..]));
        }

        tokens
    }

    // -------------------------------------------------------------------------
    // Vocabulary construction
    // -------------------------------------------------------------------------

    /// Train on a single text. See [`train`](Self::train).
    pub fn train_text(&mut self, text: &str) -> TrainingSummary {
        self.train([text])
    }

    /// Count every token of `corpus` into the vocabulary, then prune.
    ///
    /// Each text is tokenized independently and its tokens are added in order.
    /// If the vocabulary then holds more than `max_vocab` words, non-special words
    /// are ranked by descending count (ties keep first-insertion order) and those
    /// past the cap are removed. Survivors are renumbered densely after the special
    /// tokens, in rank order.
    pub fn train<I, S>(&mut self, corpus: I) -> TrainingSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.vocab.next_index();
        let mut tokens_seen = 0;
        for text in corpus {
            for token in self.tokenize(text.as_ref()) {
                self.vocab.add(&token);
                tokens_seen += 1;
            }
        }
        let words_added = (self.vocab.next_index() - before) as usize;

        let max_vocab = self.config.max_vocab;
        let mut pruned = Vec::new();
        if self.vocab.len() > max_vocab {
            let keep = max_vocab.saturating_sub(special_indices::COUNT);
            pruned = self.vocab.retain_top(keep);
            log::info!(
                "least frequent words removed until vocab size = {} ({} removed, special tokens kept)",
                self.vocab.len(),
                pruned.len()
            );
        }

        TrainingSummary {
            tokens_seen,
            words_added,
            pruned,
        }
    }

    /// Add one occurrence of `word`; returns its index.
    ///
    /// No size limit applies here; pruning only happens at the end of training.
    pub fn add_word(&mut self, word: &str) -> u32 {
        self.vocab.add(word)
    }

    pub fn add_words<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.vocab.add(word.as_ref());
        }
    }

    /// Remove `word` from the vocabulary.
    ///
    /// Special tokens are silently kept and nothing changes. Other indices are
    /// left untouched unless `reindex` is set.
    ///
    /// # Errors
    /// [`VocabError::UnknownWord`] if the word is absent. Nothing is changed.
    pub fn remove_word(&mut self, word: &str, reindex: bool) -> Result<(), TokenizerError> {
        let removed = self.vocab.remove(word)?;
        if removed && reindex {
            self.reindex();
        }
        Ok(())
    }

    /// Remove several words, reindexing once at the end if requested.
    ///
    /// # Errors
    /// [`VocabError::UnknownWord`] for the first absent word. Every word is checked
    /// before anything is removed, so on error the vocabulary is unchanged.
    pub fn remove_words<I, S>(&mut self, words: I, reindex: bool) -> Result<(), TokenizerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<S> = words.into_iter().collect();
        if let Some(missing) = words
            .iter()
            .find(|w| !self.vocab.contains((*w).as_ref()))
        {
            return Err(VocabError::UnknownWord(missing.as_ref().to_string()).into());
        }

        for word in &words {
            // Repeated words in the batch are already gone on their second visit.
            if self.vocab.contains(word.as_ref()) {
                self.vocab.remove(word.as_ref())?;
            }
        }
        if reindex {
            self.reindex();
        }
        Ok(())
    }

    /// Renumber the vocabulary densely from 0, keeping the current index order.
    pub fn reindex(&mut self) {
        self.vocab.reindex();
        log::debug!("vocabulary reindexed: {} words", self.vocab.len());
    }

    // -------------------------------------------------------------------------
    // Encoding
    // -------------------------------------------------------------------------

    /// Look up `token`, falling back to the unknown-token index.
    #[inline]
    pub fn token_to_index(&self, token: &str) -> u32 {
        self.vocab.get_index(token).unwrap_or(special_indices::UNK)
    }

    fn encode_tokens_iter<'t>(
        &self,
        tokens: impl IntoIterator<Item = &'t str>,
        use_boundary_tokens: bool,
    ) -> Vec<u32> {
        let tokens = tokens.into_iter();
        let mut ids = Vec::with_capacity(tokens.size_hint().0 + 2);
        if use_boundary_tokens {
            ids.push(special_indices::BOS);
        }
        ids.extend(tokens.map(|t| self.token_to_index(t)));
        if use_boundary_tokens {
            ids.push(special_indices::EOS);
        }
        ids
    }

    /// Encode raw text to indices.
    pub fn encode_text(&self, text: &str, use_boundary_tokens: bool) -> Vec<u32> {
        let tokens = self.tokenize(text);
        self.encode_tokens_iter(tokens.iter().map(String::as_str), use_boundary_tokens)
    }

    /// Encode pre-tokenized input to indices.
    pub fn encode_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
        use_boundary_tokens: bool,
    ) -> Vec<u32> {
        self.encode_tokens_iter(tokens.iter().map(|t| t.as_ref()), use_boundary_tokens)
    }

    /// Encode a batch of raw texts and/or token sequences.
    ///
    /// Unknown tokens map to the unknown-token index; this never fails. With
    /// `use_boundary_tokens` each sequence is wrapped in the begin/end indices.
    pub fn encode<'a, I, T>(&self, inputs: I, use_boundary_tokens: bool) -> Vec<Vec<u32>>
    where
        I: IntoIterator<Item = T>,
        T: Into<EncodeInput<'a>>,
    {
        inputs
            .into_iter()
            .map(|input| {
                let input: EncodeInput<'a> = input.into();
                match input {
                    EncodeInput::Text(text) => self.encode_text(text, use_boundary_tokens),
                    EncodeInput::Tokens(tokens) => {
                        self.encode_tokens(&tokens, use_boundary_tokens)
                    }
                }
            })
            .collect()
    }

    /// Encode raw text, mapping literal special tokens to their own indices.
    pub fn encode_with_special(&self, text: &str, use_boundary_tokens: bool) -> Vec<u32> {
        let tokens = self.tokenize_with_special(text);
        self.encode_tokens(&tokens, use_boundary_tokens)
    }

    /// Encode many raw texts in parallel. Output order matches input order.
    pub fn encode_batch<S>(&self, texts: &[S], use_boundary_tokens: bool) -> Vec<Vec<u32>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.encode_text(text.as_ref(), use_boundary_tokens))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Decoding
    // -------------------------------------------------------------------------

    /// Map each index back to its word.
    ///
    /// # Errors
    /// [`VocabError::UnknownIndex`] for an index with no word. There is no
    /// unknown-token fallback on this side.
    pub fn decode_tokens(&self, ids: &[u32]) -> Result<Vec<String>, TokenizerError> {
        ids.iter()
            .map(|&id| {
                self.vocab
                    .get_word(id)
                    .map(str::to_string)
                    .ok_or(TokenizerError::Vocab(VocabError::UnknownIndex(id)))
            })
            .collect()
    }

    /// Decode indices and join the words with single spaces.
    pub fn decode_string(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        Ok(self.decode_tokens(ids)?.join(" "))
    }

    /// Decode a batch of index sequences.
    pub fn decode<S>(
        &self,
        inputs: &[S],
        join_to_string: bool,
    ) -> Result<Vec<Decoded>, TokenizerError>
    where
        S: AsRef<[u32]>,
    {
        inputs
            .iter()
            .map(|ids| {
                let tokens = self.decode_tokens(ids.as_ref())?;
                Ok(if join_to_string {
                    Decoded::Text(tokens.join(" "))
                } else {
                    Decoded::Tokens(tokens)
                })
            })
            .collect()
    }

    /// Decode many index sequences to strings in parallel.
    pub fn decode_batch<S>(&self, inputs: &[S]) -> Result<Vec<String>, TokenizerError>
    where
        S: AsRef<[u32]> + Sync,
    {
        inputs
            .par_iter()
            .map(|ids| self.decode_string(ids.as_ref()))
            .collect()
    }
}
