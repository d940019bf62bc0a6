//! Difficulty retargeting for consensus
//!
//! This module provides the retarget window lookup and the new-target
//! calculation used at retarget boundaries.

pub mod manager;
pub mod window;

pub use manager::RetargetCalculator;
pub use window::{walk_back, ChainCursor, RetargetWindow};
