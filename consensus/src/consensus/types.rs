//! Consensus-specific types
//!
//! This module defines types used throughout the consensus module.

/// How a candidate block's declared difficulty was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Off a retarget boundary, difficulty equals the predecessor's.
    Unchanged,
    /// Minimum-difficulty exception: the block declared the max target.
    MinDifficulty,
    /// Minimum-difficulty exception: the block repeated the last difficulty
    /// that was not a minimum-difficulty one, found at `anchor_height`.
    LastRealDifficulty { anchor_height: u64 },
    /// At a retarget boundary, the declared value matches the calculation.
    Retargeted { bits: u32 },
}

impl TransitionOutcome {
    pub fn is_retarget(&self) -> bool {
        matches!(self, TransitionOutcome::Retargeted { .. })
    }
}
