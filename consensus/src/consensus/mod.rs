//! Consensus module for proof-of-work difficulty transitions
//!
//! This module implements retarget window lookup, new-target calculation
//! and validation of the difficulty declared by new blocks.

pub mod difficulty;
pub mod storage;
pub mod types;
pub mod validation;

pub use difficulty::{walk_back, ChainCursor, RetargetCalculator, RetargetWindow};
pub use storage::InMemoryHeaderStore;
pub use types::TransitionOutcome;
pub use validation::TransitionValidator;
