//! Difficulty transition validation for a periodically retargeting
//! proof-of-work chain
//!
//! This library checks that each block declares the difficulty its network
//! requires: unchanged between retarget boundaries, recomputed from the
//! window timespan at boundaries, with the testnet minimum-difficulty
//! exception where the network enables it.

pub mod consensus;

// Re-export key types for easier access
pub use consensus::difficulty::{walk_back, ChainCursor, RetargetCalculator, RetargetWindow};
pub use consensus::storage::InMemoryHeaderStore;
pub use consensus::types::TransitionOutcome;
pub use consensus::validation::TransitionValidator;
pub use retarget_core::{
    BlockCandidate, DifficultyError, DifficultyResult, Hash, HeaderLookup, HeaderRef, NetworkProfile, NetworkType,
    RetargetVariant,
};
pub use retarget_pow::Target;
