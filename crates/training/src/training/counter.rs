//! Pair counting for BPE training.
//!
//! The corpus is split on whitespace into words, each held as a sequence
//! of token IDs. Repeated words are stored once with an occurrence count,
//! so pair frequencies are weighted rather than recounted per repetition.

use ahash::AHashMap;
use subpair_core::{Pair, Vocabulary, UNK_ID};

/// Counter for BPE pair frequencies.
pub struct PairCounter {
    /// Word -> tokenized representation (as token IDs)
    words: Vec<Vec<u32>>,
    /// Word -> occurrence count
    word_counts: Vec<u64>,
    /// First-seen token sequence -> slot, for deduplication at load time
    index: AHashMap<Vec<u32>, usize>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            word_counts: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Add a corpus to the counter, splitting on runs of whitespace.
    pub fn add_corpus(&mut self, corpus: &str, vocab: &Vocabulary) {
        for word in corpus.split_whitespace() {
            self.add_word(word, vocab);
        }
    }

    /// Add a single word as its sequence of single-character token IDs.
    ///
    /// Characters missing from the vocabulary map to the `<UNK>` ID;
    /// during training every corpus character has been registered first,
    /// so this is only reachable through direct misuse.
    pub fn add_word(&mut self, word: &str, vocab: &Vocabulary) {
        let mut buf = [0u8; 4];
        let word_tokens: Vec<u32> = word
            .chars()
            .map(|c| vocab.get_id(c.encode_utf8(&mut buf)).unwrap_or(UNK_ID))
            .collect();

        if let Some(&slot) = self.index.get(&word_tokens) {
            self.word_counts[slot] += 1;
        } else {
            self.index.insert(word_tokens.clone(), self.words.len());
            self.words.push(word_tokens);
            self.word_counts.push(1);
        }
    }

    /// Count every adjacent pair across all words, weighted by word count.
    pub fn count_pairs(&self) -> AHashMap<Pair, u64> {
        let mut pair_counts: AHashMap<Pair, u64> = AHashMap::new();

        for (word, &count) in self.words.iter().zip(self.word_counts.iter()) {
            for window in word.windows(2) {
                let pair = (window[0], window[1]);
                *pair_counts.entry(pair).or_insert(0) += count;
            }
        }

        pair_counts
    }

    /// Merge a pair in all words (mutates words in place).
    ///
    /// The scan is left-to-right and non-overlapping: after a merge the
    /// scan resumes past the consumed pair, so `[a, a, a]` with pair
    /// `(a, a)` becomes `[aa, a]`.
    ///
    /// Returns the resulting pair count deltas, weighted by word count.
    /// Every consumed occurrence of the merged pair contributes a negative
    /// delta, as do the neighbor pairs it destroys; the neighbor pairs the
    /// new token forms contribute positive deltas.
    pub fn merge_pair_in_words(&mut self, pair: Pair, new_token_id: u32) -> Vec<(Pair, i64)> {
        let mut changes: Vec<(Pair, i64)> = Vec::new();

        for (word, &count) in self.words.iter_mut().zip(self.word_counts.iter()) {
            let weight = count as i64;
            let mut i = 0;

            while i + 1 < word.len() {
                if word[i] == pair.0 && word[i + 1] == pair.1 {
                    changes.push((pair, -weight));

                    if i > 0 {
                        changes.push(((word[i - 1], word[i]), -weight));
                        changes.push(((word[i - 1], new_token_id), weight));
                    }
                    if i + 2 < word.len() {
                        changes.push(((word[i + 1], word[i + 2]), -weight));
                        changes.push(((new_token_id, word[i + 2]), weight));
                    }

                    word[i] = new_token_id;
                    word.remove(i + 1);
                }

                i += 1;
            }
        }

        changes
    }

    /// Get the number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get a reference to the words.
    pub fn words(&self) -> &[Vec<u32>] {
        &self.words
    }

    /// Get a reference to the word counts.
    pub fn word_counts(&self) -> &[u64] {
        &self.word_counts
    }
}

impl Default for PairCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_with(chars: &str) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        for c in chars.chars() {
            vocab.add_token(&c.to_string()).unwrap();
        }
        vocab
    }

    #[test]
    fn test_add_word() {
        let vocab = vocab_with("abc");

        let mut counter = PairCounter::new();
        counter.add_word("abc", &vocab);

        assert_eq!(counter.word_count(), 1);
        // Specials occupy 0-3, so a=4, b=5, c=6.
        assert_eq!(counter.words()[0].as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn test_word_deduplication() {
        let vocab = vocab_with("ab");

        let mut counter = PairCounter::new();
        counter.add_corpus("ab ab ab cd", &vocab);

        assert_eq!(counter.word_count(), 2);
        assert_eq!(counter.word_counts(), &[3, 1]);

        let pairs = counter.count_pairs();
        assert_eq!(pairs.get(&(4, 5)), Some(&3));
    }

    #[test]
    fn test_count_pairs() {
        let vocab = vocab_with("abcde");

        let mut counter = PairCounter::new();
        counter.add_corpus("abc bcd", &vocab);

        let pairs = counter.count_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs.get(&(4, 5)), Some(&1)); // (a,b)
        assert_eq!(pairs.get(&(5, 6)), Some(&2)); // (b,c) in both words
        assert_eq!(pairs.get(&(6, 7)), Some(&1)); // (c,d)
    }

    #[test]
    fn test_merge_is_non_overlapping() {
        let vocab = vocab_with("a");
        let a = vocab.get_id("a").unwrap();

        let mut counter = PairCounter::new();
        counter.add_word("aaa", &vocab);

        let new_id = 100;
        counter.merge_pair_in_words((a, a), new_id);

        // [a, a, a] merges the first occurrence only: [aa, a].
        assert_eq!(counter.words()[0].as_slice(), &[new_id, a]);
    }

    #[test]
    fn test_merge_deltas_cancel_consumed_pair() {
        let vocab = vocab_with("a");
        let a = vocab.get_id("a").unwrap();

        let mut counter = PairCounter::new();
        counter.add_word("aaa", &vocab);

        let before = counter.count_pairs();
        assert_eq!(before.get(&(a, a)), Some(&2));

        let changes = counter.merge_pair_in_words((a, a), 100);

        let consumed: i64 = changes
            .iter()
            .filter(|(pair, _)| *pair == (a, a))
            .map(|(_, delta)| delta)
            .sum();
        assert_eq!(consumed, -2);

        // The surviving adjacency is (new, a).
        let formed: i64 = changes
            .iter()
            .filter(|(pair, _)| *pair == (100, a))
            .map(|(_, delta)| delta)
            .sum();
        assert_eq!(formed, 1);
    }

    #[test]
    fn test_merge_deltas_are_weighted() {
        let vocab = vocab_with("ab");
        let a = vocab.get_id("a").unwrap();
        let b = vocab.get_id("b").unwrap();

        let mut counter = PairCounter::new();
        counter.add_corpus("ab ab ab", &vocab);

        let changes = counter.merge_pair_in_words((a, b), 100);
        assert_eq!(changes, vec![((a, b), -3)]);
    }
}
