//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct tying the
//! vocabulary builder and the greedy encoder together behind the three
//! public operations: `train`, `encode` and `decode`.

use crate::encoder::GreedyEncoder;
use regex::Regex;
use std::sync::OnceLock;
use subpair_core::{Result, Vocabulary, SPECIAL_TOKENS};
use subpair_training::BpeTrainer;

/// Default cap on the character length of a single encoded match.
pub const DEFAULT_MAX_TOKEN_CHARS: usize = 10;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Longest token, in characters, the encoder will match at one
    /// position. A pragmatic cap, not a correctness requirement: for
    /// full-fidelity round-tripping on corpus text it must be at least
    /// the length of the longest trained token.
    pub max_token_chars: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_token_chars: DEFAULT_MAX_TOKEN_CHARS,
        }
    }
}

/// BPE tokenizer.
///
/// Holds the vocabulary as one owned aggregate. `train` grows it in
/// place and must complete before `encode`/`decode` are meaningful;
/// afterwards the tokenizer is read-only and safe to share by
/// reference across threads.
pub struct Tokenizer {
    /// Vocabulary
    vocab: Vocabulary,
    /// Configuration
    config: TokenizerConfig,
    /// Longest-match encoder, rebuilt after each training run
    encoder: GreedyEncoder,
}

impl Tokenizer {
    /// Create a new tokenizer with the default configuration.
    ///
    /// The vocabulary starts with only the special tokens.
    pub fn new() -> Self {
        Self::with_config(TokenizerConfig::default())
    }

    /// Create a new tokenizer with the given configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        let vocab = Vocabulary::new();
        let encoder = GreedyEncoder::from_vocab(&vocab, config.max_token_chars);

        Self {
            vocab,
            config,
            encoder,
        }
    }

    /// Train the tokenizer on a corpus, growing the vocabulary to at
    /// most `vocab_size` entries.
    ///
    /// Registers every distinct corpus character, then merges the most
    /// frequent adjacent pairs until the target size is reached or no
    /// pairs remain.
    pub fn train(&mut self, corpus: &str, vocab_size: usize) -> Result<()> {
        BpeTrainer::new(vocab_size).train(corpus, &mut self.vocab)?;

        // The vocabulary grew; rebuild the matcher over it.
        self.encoder = GreedyEncoder::from_vocab(&self.vocab, self.config.max_token_chars);

        Ok(())
    }

    /// Encode text to token IDs.
    ///
    /// Total and deterministic: characters with no vocabulary match at
    /// any length emit the `<UNK>` ID and the cursor advances one
    /// character.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encoder.encode(text)
    }

    /// Decode token IDs back to text.
    ///
    /// Unknown or out-of-range IDs contribute the empty string. The
    /// special-token markers are then stripped from the concatenated
    /// result textually, not by ID, so a token whose content happens to
    /// contain a marker substring is stripped as well.
    pub fn decode(&self, ids: &[u32]) -> String {
        let joined: String = ids
            .iter()
            .map(|&id| self.vocab.get_token(id).unwrap_or(""))
            .collect();

        strip_special_markers(&joined)
    }

    /// Get a reference to the vocabulary for inspection.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get the tokenizer configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove every literal occurrence of the special-token markers.
fn strip_special_markers(text: &str) -> String {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    let re = MARKERS.get_or_init(|| {
        let pattern = SPECIAL_TOKENS.map(regex::escape).join("|");
        Regex::new(&pattern).expect("special marker alternation is a valid pattern")
    });

    re.replace_all(text, "").into_owned()
}
