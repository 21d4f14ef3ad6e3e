//! subpair-core - Core data structures for the subpair BPE tokenizer
//!
//! This crate provides the vocabulary and pair bookkeeping shared by the
//! training and tokenizer crates.
//!
//! # Features
//!
//! - Bijective token<->ID storage using `AHashMap` and compact strings
//! - Fixed special tokens (`<PAD>`, `<BOS>`, `<EOS>`, `<UNK>`) at IDs 0-3
//! - Stale-entry-tolerant priority queue for merge candidates
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use subpair_core::Vocabulary;
//!
//! let mut vocab = Vocabulary::new();
//! let id = vocab.add_token("hello")?;
//! assert_eq!(vocab.get_token(id), Some("hello"));
//! # Ok::<(), subpair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod vocab;
pub use vocab::{
    Vocab, VocabR, Vocabulary, BOS_ID, BOS_TOKEN, EOS_ID, EOS_TOKEN, PAD_ID, PAD_TOKEN,
    SPECIAL_TOKENS, UNK_ID, UNK_TOKEN,
};

pub mod priority;
pub use priority::{MergeCandidate, Pair, PairPriorityQueue};
