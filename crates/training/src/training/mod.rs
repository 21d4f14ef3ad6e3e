//! BPE training: pair counting and the merge loop.

pub mod counter;
pub mod trainer;

pub use counter::PairCounter;
pub use trainer::BpeTrainer;
