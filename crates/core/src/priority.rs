//! Priority queue for BPE merge candidates.
//!
//! During training the pair frequency table changes after every merge,
//! so the queue tolerates stale entries: each pair's current count is
//! tracked on the side, and popped entries whose count no longer matches
//! are silently discarded.

use ahash::AHashMap;
use dary_heap::OctonaryHeap;

/// A pair of adjacent token IDs.
pub type Pair = (u32, u32);

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

// Higher count = higher priority. Equal counts fall back to the pair
// ordering itself so that training is deterministic for a given corpus.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| self.pair.cmp(&other.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue for BPE merge operations.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
/// Entries are never removed when a count changes; instead the new count
/// is recorded and the outdated heap entry is dropped when popped.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Current count per pair, used to detect stale heap entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.current_counts.insert(candidate.pair, candidate.count);
        self.heap.push(candidate);
    }

    /// Record a new count for a pair.
    ///
    /// A count of zero retires the pair; any heap entries it still has
    /// become stale. A positive count enqueues a fresh candidate.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        if new_count == 0 {
            self.current_counts.remove(&pair);
        } else {
            self.push(MergeCandidate::new(pair, new_count));
        }
    }

    /// Pop the highest priority merge candidate.
    ///
    /// Returns None if the queue is empty or only contains stale entries.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if let Some(&current) = self.current_counts.get(&candidate.pair) {
                if current == candidate.count {
                    self.current_counts.remove(&candidate.pair);
                    return Some(candidate);
                }
                // Stale entry, keep draining.
            }
        }
        None
    }

    /// Get the current count for a pair.
    pub fn get_count(&self, pair: Pair) -> Option<u64> {
        self.current_counts.get(&pair).copied()
    }

    /// Get the number of (potentially stale) entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        queue.push(MergeCandidate::new((1, 2), 20));
        queue.push(MergeCandidate::new((2, 3), 15));

        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert_eq!(queue.pop().unwrap().pair, (2, 3));
        assert_eq!(queue.pop().unwrap().pair, (0, 1));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 7));
        queue.push(MergeCandidate::new((5, 2), 7));

        // Equal counts: the larger pair wins.
        assert_eq!(queue.pop().unwrap().pair, (5, 2));
        assert_eq!(queue.pop().unwrap().pair, (0, 1));
    }

    #[test]
    fn test_stale_entry_detection() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 30));
        queue.push(MergeCandidate::new((1, 2), 20));

        // Lower (0, 1) below (1, 2); the count-30 entry becomes stale.
        queue.update((0, 1), 15);

        let first = queue.pop().unwrap();
        assert_eq!(first.pair, (1, 2));

        let second = queue.pop().unwrap();
        assert_eq!(second.pair, (0, 1));
        assert_eq!(second.count, 15);

        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_update_to_zero_retires_pair() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 5));
        queue.push(MergeCandidate::new((1, 2), 3));
        queue.update((0, 1), 0);

        // The retired pair is never returned, even though its heap entry
        // had the highest count.
        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert!(queue.pop().is_none());
        assert_eq!(queue.get_count((0, 1)), None);
    }

    #[test]
    fn test_get_count() {
        let mut queue = PairPriorityQueue::new();

        queue.push(MergeCandidate::new((0, 1), 10));
        assert_eq!(queue.get_count((0, 1)), Some(10));
        assert_eq!(queue.get_count((1, 2)), None);

        queue.update((0, 1), 20);
        assert_eq!(queue.get_count((0, 1)), Some(20));
    }
}
