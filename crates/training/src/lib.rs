//! subpair-training - BPE training infrastructure
//!
//! This crate provides the vocabulary builder: it learns a subword
//! vocabulary from a training corpus by iteratively merging the most
//! frequent adjacent token pairs.
//!
//! # Features
//!
//! - Pair frequency counting with word deduplication and weighting
//! - Incrementally maintained counts (no per-round recount of the corpus)
//! - Integration with subpair-core for vocabulary and queue operations
//!
//! # Example
//!
//! ```rust
//! use subpair_core::Vocabulary;
//! use subpair_training::BpeTrainer;
//!
//! let mut vocab = Vocabulary::new();
//! let trainer = BpeTrainer::new(32);
//! trainer.train("low lower lowest", &mut vocab)?;
//! assert!(vocab.len() <= 32);
//! # Ok::<(), subpair_training::TokenizerError>(())
//! ```

pub use subpair_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{BpeTrainer, PairCounter};
