//! Bidirectional word/index table with occurrence counts.
//!
//! [`Vocab`] keeps two maps that are always updated together:
//!
//! - an encoder from word to [`WordEntry`] (index, count, insertion order)
//! - a decoder from index back to word
//!
//! Every mutator touches both maps before returning, so the word↔index mapping is
//! a bijection over the live words at all times.
//!
//! # Index assignment
//!
//! New words receive the next unused index. Indices are never handed out twice,
//! so removing a word leaves a gap until [`Vocab::reindex`] (or a pruning pass)
//! renumbers the table densely from 0.
//!
//! # Protected entries
//!
//! Entries inserted with [`Vocab::insert_protected`] cannot be removed; removal
//! requests for them succeed without doing anything. The tokenizer uses this for
//! its four special tokens.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by vocabulary lookups and removals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VocabError {
    #[error("{0:?} does not exist in the vocabulary")]
    UnknownWord(String),
    #[error("index {0} does not exist in the vocabulary")]
    UnknownIndex(u32),
}

/// Bookkeeping for one vocabulary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    /// Current index of the word.
    pub index: u32,
    /// Number of times the word has been added.
    pub count: u64,
    /// Position in first-insertion order; used to break count ties.
    seq: u64,
    protected: bool,
}

impl WordEntry {
    pub fn is_protected(&self) -> bool {
        self.protected
    }
}

/// Word↔index table with occurrence counts.
#[derive(Debug, Clone, Default)]
pub struct Vocab {
    encoder: FxHashMap<String, WordEntry>,
    decoder: FxHashMap<u32, String>,
    next_index: u32,
    next_seq: u64,
}

impl Vocab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live words.
    pub fn len(&self) -> usize {
        self.encoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoder.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.encoder.contains_key(word)
    }

    pub fn get_index(&self, word: &str) -> Option<u32> {
        self.encoder.get(word).map(|e| e.index)
    }

    pub fn get_word(&self, index: u32) -> Option<&str> {
        self.decoder.get(&index).map(String::as_str)
    }

    pub fn get_entry(&self, word: &str) -> Option<&WordEntry> {
        self.encoder.get(word)
    }

    pub fn count(&self, word: &str) -> Option<u64> {
        self.encoder.get(word).map(|e| e.count)
    }

    /// The index the next new word will receive.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Get the encoder map (word -> entry).
    pub fn encoder(&self) -> &FxHashMap<String, WordEntry> {
        &self.encoder
    }

    /// Get the decoder map (index -> word).
    pub fn decoder(&self) -> &FxHashMap<u32, String> {
        &self.decoder
    }

    /// Add one occurrence of `word` and return its index.
    ///
    /// A new word gets the next unused index and a count of 1; a known word only
    /// has its count incremented.
    pub fn add(&mut self, word: &str) -> u32 {
        self.add_entry(word, false)
    }

    /// Add `word` as a protected entry. Existing words become protected too.
    pub fn insert_protected(&mut self, word: &str) -> u32 {
        self.add_entry(word, true)
    }

    fn add_entry(&mut self, word: &str, protected: bool) -> u32 {
        if let Some(entry) = self.encoder.get_mut(word) {
            entry.count += 1;
            entry.protected |= protected;
            return entry.index;
        }

        let index = self.next_index;
        self.encoder.insert(
            word.to_string(),
            WordEntry {
                index,
                count: 1,
                seq: self.next_seq,
                protected,
            },
        );
        self.decoder.insert(index, word.to_string());
        self.next_index += 1;
        self.next_seq += 1;
        index
    }

    /// Remove `word` and its index mapping.
    ///
    /// Returns `Ok(false)` without touching anything when the word is protected.
    ///
    /// # Errors
    /// [`VocabError::UnknownWord`] if the word is absent; the table is unchanged.
    pub fn remove(&mut self, word: &str) -> Result<bool, VocabError> {
        let entry = self
            .encoder
            .get(word)
            .ok_or_else(|| VocabError::UnknownWord(word.to_string()))?;
        if entry.protected {
            return Ok(false);
        }

        let index = entry.index;
        self.encoder.remove(word);
        self.decoder.remove(&index);
        Ok(true)
    }

    /// Words in ascending index order.
    pub fn words(&self) -> Vec<&str> {
        let mut indexed: Vec<(u32, &str)> = self
            .decoder
            .iter()
            .map(|(&i, w)| (i, w.as_str()))
            .collect();
        indexed.sort_unstable_by_key(|&(i, _)| i);
        indexed.into_iter().map(|(_, w)| w).collect()
    }

    /// All entries ranked by descending count, ties in first-insertion order.
    pub fn ranked(&self) -> Vec<(&str, &WordEntry)> {
        let mut ranked: Vec<(&str, &WordEntry)> =
            self.encoder.iter().map(|(w, e)| (w.as_str(), e)).collect();
        // Insertion order first, then a stable sort by count keeps ties in that order.
        ranked.sort_unstable_by_key(|(_, e)| e.seq);
        ranked.sort_by(|(_, a), (_, b)| b.count.cmp(&a.count));
        ranked
    }

    /// The `n` most frequent words with their counts.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        self.ranked()
            .into_iter()
            .take(n)
            .map(|(w, e)| (w, e.count))
            .collect()
    }

    /// Whether the indices are exactly `0..len`.
    pub fn is_dense(&self) -> bool {
        let len = self.decoder.len() as u32;
        self.decoder.keys().all(|&i| i < len)
    }

    /// Renumber all entries densely from 0, preserving their current index order.
    pub fn reindex(&mut self) {
        let order: Vec<String> = self.words().into_iter().map(str::to_string).collect();
        self.assign_indices(order);
    }

    /// Keep the protected entries plus the `keep` highest-ranked unprotected ones.
    ///
    /// Survivors are renumbered densely: protected entries first in their current
    /// index order, then the unprotected ones in rank order. Returns the removed
    /// words, highest ranked first.
    pub fn retain_top(&mut self, keep: usize) -> Vec<String> {
        let mut protected: Vec<(u32, String)> = Vec::new();
        let mut ranked: Vec<String> = Vec::new();
        for (word, entry) in self.ranked() {
            if entry.protected {
                protected.push((entry.index, word.to_string()));
            } else {
                ranked.push(word.to_string());
            }
        }
        protected.sort_unstable_by_key(|(i, _)| *i);

        let removed = ranked.split_off(keep.min(ranked.len()));
        for word in &removed {
            self.encoder.remove(word);
        }

        let order = protected
            .into_iter()
            .map(|(_, w)| w)
            .chain(ranked)
            .collect();
        self.assign_indices(order);
        removed
    }

    /// Rebuild both maps so that `order[i]` has index `i`.
    ///
    /// `order` must list every live word exactly once.
    fn assign_indices(&mut self, order: Vec<String>) {
        debug_assert_eq!(order.len(), self.encoder.len());
        self.decoder.clear();
        for (index, word) in order.into_iter().enumerate() {
            let index = index as u32;
            if let Some(entry) = self.encoder.get_mut(&word) {
                entry.index = index;
            }
            self.decoder.insert(index, word);
        }
        self.next_index = self.decoder.len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_of(words: &[&str]) -> Vocab {
        let mut vocab = Vocab::new();
        for w in words {
            vocab.add(w);
        }
        vocab
    }

    fn assert_bijection(vocab: &Vocab) {
        assert_eq!(vocab.encoder().len(), vocab.decoder().len());
        for (word, entry) in vocab.encoder() {
            assert_eq!(vocab.get_word(entry.index), Some(word.as_str()));
        }
    }

    #[test]
    fn test_add_assigns_sequential_indices() {
        let vocab = vocab_of(&["a", "b", "a", "c"]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_index("a"), Some(0));
        assert_eq!(vocab.get_index("b"), Some(1));
        assert_eq!(vocab.get_index("c"), Some(2));
        assert_eq!(vocab.count("a"), Some(2));
        assert_bijection(&vocab);
    }

    #[test]
    fn test_remove_leaves_gap_and_never_reuses_index() {
        let mut vocab = vocab_of(&["a", "b", "c"]);
        assert_eq!(vocab.remove("b"), Ok(true));
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get_word(1), None);
        assert!(!vocab.is_dense());

        // The next index is 3, not the current size (2), so "c" keeps its slot.
        assert_eq!(vocab.add("d"), 3);
        assert_eq!(vocab.get_word(2), Some("c"));
        assert_bijection(&vocab);
    }

    #[test]
    fn test_remove_unknown_word() {
        let mut vocab = vocab_of(&["a"]);
        assert_eq!(
            vocab.remove("zzz"),
            Err(VocabError::UnknownWord("zzz".to_string()))
        );
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_protected_entry_not_removed() {
        let mut vocab = Vocab::new();
        vocab.insert_protected("<PAD>");
        vocab.add("x");
        assert_eq!(vocab.remove("<PAD>"), Ok(false));
        assert_eq!(vocab.get_index("<PAD>"), Some(0));
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_reindex_is_dense_and_ordered() {
        let mut vocab = vocab_of(&["a", "b", "c", "d", "e"]);
        vocab.remove("b").unwrap();
        vocab.remove("d").unwrap();
        vocab.reindex();

        assert!(vocab.is_dense());
        assert_eq!(vocab.words(), vec!["a", "c", "e"]);
        assert_eq!(vocab.next_index(), 3);
        assert_bijection(&vocab);
    }

    #[test]
    fn test_ranked_is_stable() {
        let vocab = vocab_of(&["x", "y", "z", "y", "z", "w"]);
        let order: Vec<&str> = vocab.ranked().into_iter().map(|(w, _)| w).collect();
        assert_eq!(order, vec!["y", "z", "x", "w"]);
        assert_eq!(vocab.most_common(2), vec![("y", 2), ("z", 2)]);
    }

    #[test]
    fn test_retain_top() {
        let mut vocab = Vocab::new();
        vocab.insert_protected("<S>");
        for w in ["a", "b", "b", "c", "c", "c", "d"] {
            vocab.add(w);
        }

        let removed = vocab.retain_top(2);
        assert_eq!(removed, vec!["a".to_string(), "d".to_string()]);
        assert_eq!(vocab.words(), vec!["<S>", "c", "b"]);
        assert!(vocab.is_dense());
        assert_bijection(&vocab);
    }

    #[test]
    fn test_retain_top_keeps_everything_when_small() {
        let mut vocab = vocab_of(&["a", "b"]);
        assert!(vocab.retain_top(10).is_empty());
        assert_eq!(vocab.len(), 2);
    }
}
