//! BPE trainer: the merge loop of the vocabulary builder.

use super::counter::PairCounter;
use ahash::{AHashMap, AHashSet};
use subpair_core::{
    MergeCandidate, Pair, PairPriorityQueue, Result, TokenizerError, Vocabulary,
};

/// BPE trainer.
///
/// Grows a vocabulary in place by iteratively merging the most frequent
/// adjacent token pair until the target size is reached or no pairs
/// remain. Pair counts are maintained incrementally across rounds: only
/// the pairs touched by the last merge are updated, which keeps each
/// round proportional to the number of merged occurrences instead of the
/// corpus size.
///
/// Among pairs with equal counts the winner is the larger `(u32, u32)`
/// pair, which makes training deterministic for a given corpus.
pub struct BpeTrainer {
    /// Target vocabulary size, special tokens included
    target_vocab_size: usize,
}

impl BpeTrainer {
    /// Create a new trainer with the given target vocabulary size.
    pub fn new(target_vocab_size: usize) -> Self {
        Self { target_vocab_size }
    }

    /// Train on the given corpus, mutating `vocab` in place.
    ///
    /// Every distinct character of the corpus is registered first, in
    /// left-to-right first-occurrence order, so the resulting size is at
    /// least `min(target, specials + distinct characters)`. The merge
    /// loop may terminate below the target when no mergeable pairs
    /// remain (empty corpus, or all words of length <= 1).
    pub fn train(&self, corpus: &str, vocab: &mut Vocabulary) -> Result<()> {
        self.register_base_chars(corpus, vocab)?;

        let mut counter = PairCounter::new();
        counter.add_corpus(corpus, vocab);

        let mut pair_counts = counter.count_pairs();
        let mut queue = PairPriorityQueue::with_capacity(pair_counts.len());
        for (&pair, &count) in &pair_counts {
            queue.push(MergeCandidate::new(pair, count));
        }

        while vocab.len() < self.target_vocab_size {
            let candidate = match queue.pop() {
                Some(c) => c,
                None => break,
            };

            let merged = self.merged_token(candidate.pair, vocab)?;
            // No-op if the same merged string arose independently.
            let new_token_id = vocab.add_token(&merged)?;

            let changes = counter.merge_pair_in_words(candidate.pair, new_token_id);

            // The merge consumes every occurrence of the pair; retire it
            // before applying the deltas so it can never be re-selected.
            pair_counts.remove(&candidate.pair);
            queue.update(candidate.pair, 0);

            self.apply_changes(&mut pair_counts, &mut queue, changes);
        }

        Ok(())
    }

    /// Register every distinct character of the corpus, in the corpus's
    /// left-to-right first-occurrence order.
    fn register_base_chars(&self, corpus: &str, vocab: &mut Vocabulary) -> Result<()> {
        let mut seen = AHashSet::new();
        let mut buf = [0u8; 4];

        for ch in corpus.chars() {
            if seen.insert(ch) {
                vocab.add_token(ch.encode_utf8(&mut buf))?;
            }
        }

        Ok(())
    }

    /// Get the concatenated token string for a merged pair.
    fn merged_token(&self, pair: Pair, vocab: &Vocabulary) -> Result<String> {
        let left = vocab
            .get_token(pair.0)
            .ok_or_else(|| TokenizerError::Training(format!("unknown token ID {}", pair.0)))?;
        let right = vocab
            .get_token(pair.1)
            .ok_or_else(|| TokenizerError::Training(format!("unknown token ID {}", pair.1)))?;

        Ok(format!("{left}{right}"))
    }

    /// Apply pair count deltas from a merge to the counts and the queue.
    fn apply_changes(
        &self,
        pair_counts: &mut AHashMap<Pair, u64>,
        queue: &mut PairPriorityQueue,
        changes: Vec<(Pair, i64)>,
    ) {
        let mut aggregated: AHashMap<Pair, i64> = AHashMap::new();
        for (pair, delta) in changes {
            *aggregated.entry(pair).or_insert(0) += delta;
        }

        for (pair, delta) in aggregated {
            if delta == 0 {
                continue;
            }

            let current = pair_counts.get(&pair).copied().unwrap_or(0) as i64;
            let new_count = (current + delta).max(0) as u64;

            if new_count > 0 {
                pair_counts.insert(pair, new_count);
            } else {
                pair_counts.remove(&pair);
            }
            queue.update(pair, new_count);
        }
    }
}
