//! Vocabulary storage and lookup.
//!
//! Token strings are stored as `CompactString` in an `AHashMap`, with a
//! reverse map for ID lookups during decoding. IDs are assigned in
//! allocation order starting at 0 and are never reused or renumbered.
//! The four special tokens are registered at construction and always
//! occupy IDs 0-3.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Padding marker.
pub const PAD_TOKEN: &str = "<PAD>";
/// Beginning-of-sequence marker.
pub const BOS_TOKEN: &str = "<BOS>";
/// End-of-sequence marker.
pub const EOS_TOKEN: &str = "<EOS>";
/// Unknown-input marker, emitted for characters with no vocabulary match.
pub const UNK_TOKEN: &str = "<UNK>";

/// ID of [`PAD_TOKEN`].
pub const PAD_ID: u32 = 0;
/// ID of [`BOS_TOKEN`].
pub const BOS_ID: u32 = 1;
/// ID of [`EOS_TOKEN`].
pub const EOS_ID: u32 = 2;
/// ID of [`UNK_TOKEN`].
pub const UNK_ID: u32 = 3;

/// The special tokens in registration order (IDs 0-3).
pub const SPECIAL_TOKENS: [&str; 4] = [PAD_TOKEN, BOS_TOKEN, EOS_TOKEN, UNK_TOKEN];

/// Vocabulary with forward and reverse mappings.
///
/// The two maps form a bijection: every ID in `0..len()` maps to exactly
/// one token and vice versa. The vocabulary only ever grows; once a token
/// is added its ID is fixed for the lifetime of the vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    pub vocab: Vocab,
    /// Reverse mapping: ID -> token string
    pub vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a new vocabulary containing only the special tokens.
    pub fn new() -> Self {
        Self::with_capacity(SPECIAL_TOKENS.len())
    }

    /// Create a new vocabulary with capacity, containing only the special tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(SPECIAL_TOKENS.len());
        let mut vocabulary = Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
        };

        for (id, token) in SPECIAL_TOKENS.iter().enumerate() {
            let token = CompactString::new(token);
            vocabulary.vocab.insert(token.clone(), id as u32);
            vocabulary.vocab_r.insert(id as u32, token);
        }

        vocabulary
    }

    /// Add a token to the vocabulary, assigning it the next sequential ID.
    ///
    /// Idempotent: adding a token that already exists returns its existing
    /// ID and changes nothing.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        let token = CompactString::new(token);

        if let Some(&id) = self.vocab.get(&token) {
            return Ok(id);
        }

        let next = self.vocab.len();
        let id = u32::try_from(next)
            .map_err(|_| TokenizerError::VocabularyOverflow { tried: next })?;
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        Ok(id)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary (special tokens included).
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    ///
    /// Always false for vocabularies built by this crate, which carry
    /// the special tokens from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }

    /// Check if an ID belongs to a special token.
    #[inline]
    pub fn is_special(&self, id: u32) -> bool {
        id <= UNK_ID
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specials_occupy_first_ids() {
        let vocab = Vocabulary::new();

        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.get_id(PAD_TOKEN), Some(PAD_ID));
        assert_eq!(vocab.get_id(BOS_TOKEN), Some(BOS_ID));
        assert_eq!(vocab.get_id(EOS_TOKEN), Some(EOS_ID));
        assert_eq!(vocab.get_id(UNK_TOKEN), Some(UNK_ID));
        assert_eq!(vocab.get_token(UNK_ID), Some(UNK_TOKEN));
    }

    #[test]
    fn test_add_token_sequential_ids() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("a").unwrap();
        let id2 = vocab.add_token("b").unwrap();

        assert_eq!(id1, 4);
        assert_eq!(id2, 5);
        assert_eq!(vocab.get_id("a"), Some(4));
        assert_eq!(vocab.get_token(5), Some("b"));
    }

    #[test]
    fn test_add_token_idempotent() {
        let mut vocab = Vocabulary::new();
        let id1 = vocab.add_token("hello").unwrap();
        let id2 = vocab.add_token("hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(vocab.len(), 5);
        // Existing mappings are untouched by the duplicate add.
        assert_eq!(vocab.get_id(PAD_TOKEN), Some(PAD_ID));
    }

    #[test]
    fn test_is_special() {
        let mut vocab = Vocabulary::new();
        let id = vocab.add_token("x").unwrap();

        for special in 0..4 {
            assert!(vocab.is_special(special));
        }
        assert!(!vocab.is_special(id));
    }

    #[test]
    fn test_unknown_lookups() {
        let vocab = Vocabulary::new();

        assert_eq!(vocab.get_id("missing"), None);
        assert_eq!(vocab.get_token(999), None);
    }
}
