//! Error types for the subpair tokenizer.

use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// The public `encode`/`decode` surface is total and never returns these;
/// errors can only arise while building the vocabulary.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// Error during training
    #[error("Training error: {0}")]
    Training(String),

    /// Token ID space exhausted
    #[error("Vocabulary overflow: cannot assign ID {tried} (IDs are u32)")]
    VocabularyOverflow { tried: usize },
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
