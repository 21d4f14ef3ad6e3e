//! Greedy longest-match encoding.
//!
//! The encoder walks the input one `char` at a time and emits the ID of
//! the longest vocabulary token starting at the cursor, bounded by a
//! configurable match cap. A character trie makes each step
//! O(max_token_chars) instead of probing every substring length. A
//! position with no match at any length emits `<UNK>` and advances one
//! character, so encoding is total and always makes forward progress.

use ahash::AHashMap;
use subpair_core::{Vocabulary, UNK_ID};

/// Trie node for longest-match tokenization.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Child nodes indexed by character
    children: AHashMap<char, TrieNode>,
    /// Token ID if this node completes a token
    token_id: Option<u32>,
}

/// Greedy longest-match encoder over a fixed vocabulary.
///
/// Built once from a trained vocabulary; read-only afterwards.
pub struct GreedyEncoder {
    root: TrieNode,
    max_token_chars: usize,
}

impl GreedyEncoder {
    /// Build an encoder from a vocabulary.
    ///
    /// `max_token_chars` caps the match length; tokens longer than the
    /// cap can never be emitted and are left out of the trie.
    pub fn from_vocab(vocab: &Vocabulary, max_token_chars: usize) -> Self {
        let mut root = TrieNode::default();

        for (token, &id) in vocab.vocab.iter() {
            if token.chars().count() > max_token_chars {
                continue;
            }

            let mut node = &mut root;
            for ch in token.chars() {
                node = node.children.entry(ch).or_default();
            }
            node.token_id = Some(id);
        }

        Self {
            root,
            max_token_chars,
        }
    }

    /// Encode text to token IDs.
    ///
    /// The result is never longer than the input's character count, and
    /// is non-empty whenever the input is.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let chars: Vec<char> = text.chars().collect();
        let mut ids = Vec::with_capacity(chars.len());
        let mut pos = 0;

        while pos < chars.len() {
            match self.find_longest_match(&chars, pos) {
                Some((token_id, length)) => {
                    ids.push(token_id);
                    pos += length;
                }
                None => {
                    ids.push(UNK_ID);
                    pos += 1;
                }
            }
        }

        ids
    }

    /// Find the longest matching token starting at `pos`, within the
    /// match cap.
    fn find_longest_match(&self, chars: &[char], pos: usize) -> Option<(u32, usize)> {
        let mut node = &self.root;
        let mut best: Option<(u32, usize)> = None;
        let end = chars.len().min(pos + self.max_token_chars);

        for (i, ch) in chars[pos..end].iter().enumerate() {
            match node.children.get(ch) {
                Some(child) => {
                    node = child;
                    if let Some(token_id) = node.token_id {
                        best = Some((token_id, i + 1));
                    }
                }
                None => break,
            }
        }

        best
    }
}
