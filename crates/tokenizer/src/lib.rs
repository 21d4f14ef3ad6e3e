//! subpair-tokenizer - High-level tokenizer API
//!
//! This crate ties the vocabulary builder and the greedy encoder into a
//! single `Tokenizer` with three operations: `train`, `encode` and
//! `decode`.
//!
//! # Features
//!
//! - One-call training from a corpus to a fixed-size subword vocabulary
//! - Total, fail-soft encoding: unmatched characters degrade to `<UNK>`
//! - Total decoding: unknown IDs contribute nothing, special markers
//!   are stripped from the output
//! - Read access to the token<->ID maps for inspection
//!
//! # Example
//!
//! ```rust
//! use subpair_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.train("low lower lowest", 32)?;
//!
//! let ids = tokenizer.encode("lower");
//! assert_eq!(tokenizer.decode(&ids), "lower");
//! # Ok::<(), subpair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use subpair_core::{Result, TokenizerError, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerConfig, DEFAULT_MAX_TOKEN_CHARS};

// Longest-match encoding
pub mod encoder;
pub use encoder::GreedyEncoder;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
