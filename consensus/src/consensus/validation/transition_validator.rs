//! Difficulty transition validation
//!
//! This module checks the compact target a new block declares against the
//! rules of its network:
//! - off a retarget boundary the target must stay unchanged, unless the
//!   network allows minimum-difficulty blocks
//! - at a boundary the target must match the retarget calculation over
//!   the window ending at the predecessor

use crate::consensus::difficulty::{ChainCursor, RetargetCalculator, RetargetWindow};
use crate::consensus::types::TransitionOutcome;
use log::{debug, trace, warn};
use retarget_core::{
    BlockCandidate, DifficultyError, DifficultyResult, HeaderLookup, HeaderRef, NetworkProfile, NetworkType,
    RetargetVariant,
};
use retarget_pow::Target;

/// Steps of a boundary check. Accept and reject are the `Ok` and `Err`
/// returns of [`TransitionValidator::validate`].
#[derive(Debug)]
enum Stage {
    CheckBoundary,
    WindowLookback,
    Compute(RetargetWindow),
    Compare(u32),
}

/// Validates declared difficulty for one network over a header lookup.
///
/// Holds no mutable state; it is safe to share between threads whenever
/// the lookup is.
pub struct TransitionValidator<'a, L: HeaderLookup> {
    profile: &'a NetworkProfile,
    lookup: L,
}

impl<L: HeaderLookup> TransitionValidator<'static, L> {
    /// Validator using the built-in profile of `network`.
    pub fn for_network(network: NetworkType, lookup: L) -> Self {
        Self::new(NetworkProfile::get(network), lookup)
    }
}

impl<'a, L: HeaderLookup> TransitionValidator<'a, L> {
    pub fn new(profile: &'a NetworkProfile, lookup: L) -> Self {
        Self { profile, lookup }
    }

    /// Checks `candidate`, which must extend `prev`.
    pub fn validate(&self, prev: &HeaderRef, candidate: &BlockCandidate) -> DifficultyResult<TransitionOutcome> {
        let result = self.run(prev, candidate);
        if let Err(err) = &result {
            warn!("Rejecting difficulty {:x} on top of height {}: {}", candidate.bits, prev.height, err);
        }
        result
    }

    /// Like [`Self::validate`], resolving the predecessor through the lookup.
    pub fn validate_candidate(&self, candidate: &BlockCandidate) -> DifficultyResult<TransitionOutcome> {
        let prev = self
            .lookup
            .get_header(&candidate.prev_hash)
            .ok_or(DifficultyError::UnknownPredecessor(candidate.prev_hash))?;
        self.validate(&prev, candidate)
    }

    fn run(&self, prev: &HeaderRef, candidate: &BlockCandidate) -> DifficultyResult<TransitionOutcome> {
        let mut stage = Stage::CheckBoundary;
        loop {
            trace!("Difficulty transition after height {}: {:?}", prev.height, stage);
            stage = match stage {
                Stage::CheckBoundary => {
                    if !self.profile.is_boundary(prev.height) {
                        return self.check_off_boundary(prev, candidate);
                    }
                    Stage::WindowLookback
                }
                Stage::WindowLookback => Stage::Compute(RetargetWindow::fetch(prev, self.profile, &self.lookup)?),
                Stage::Compute(window) => {
                    Stage::Compare(RetargetCalculator::new(self.profile).compute(&window, candidate.bits)?)
                }
                Stage::Compare(computed) => {
                    if computed != candidate.bits {
                        return Err(DifficultyError::DifficultyMismatch { computed, declared: candidate.bits });
                    }
                    debug!("Retarget at height {} to {:x}", prev.height + 1, computed);
                    return Ok(TransitionOutcome::Retargeted { bits: computed });
                }
            };
        }
    }

    fn check_off_boundary(&self, prev: &HeaderRef, candidate: &BlockCandidate) -> DifficultyResult<TransitionOutcome> {
        if let RetargetVariant::MinDifficultyException { activation_time } = self.profile.variant() {
            if candidate.timestamp > activation_time {
                return self.check_min_difficulty(prev, candidate);
            }
        }

        if candidate.bits != prev.bits {
            return Err(DifficultyError::UnexpectedDifficultyChange {
                height: prev.height,
                declared: candidate.bits,
                expected: prev.bits,
            });
        }
        Ok(TransitionOutcome::Unchanged)
    }

    fn check_min_difficulty(&self, prev: &HeaderRef, candidate: &BlockCandidate) -> DifficultyResult<TransitionOutcome> {
        let max_target = Target::new(self.profile.max_target());
        let declared = Target::from_compact(candidate.bits)?;
        let delta = candidate.timestamp as i64 - prev.timestamp as i64;

        if (0..=self.profile.min_difficulty_gap() as i64).contains(&delta) {
            if declared != max_target {
                return Err(DifficultyError::TestnetExceptionViolation {
                    expected: max_target.to_compact(),
                    declared: candidate.bits,
                });
            }
            debug!("Minimum difficulty block after height {}, {}s since predecessor", prev.height, delta);
            return Ok(TransitionOutcome::MinDifficulty);
        }

        let anchor = self.last_real_difficulty(prev, max_target)?;
        if Target::from_compact(anchor.bits)? != declared {
            return Err(DifficultyError::TestnetExceptionViolation { expected: anchor.bits, declared: candidate.bits });
        }
        Ok(TransitionOutcome::LastRealDifficulty { anchor_height: anchor.height })
    }

    /// Walks back from `prev` over minimum-difficulty blocks to the most
    /// recent header carrying a real difficulty. Genesis always stops the
    /// walk.
    fn last_real_difficulty(&self, prev: &HeaderRef, max_target: Target) -> DifficultyResult<HeaderRef> {
        let cursor = ChainCursor::new(&self.lookup);
        let mut header = *prev;
        while !header.is_genesis()
            && !self.profile.is_retarget_height(header.height)
            && Target::from_compact(header.bits)? == max_target
        {
            header = cursor.predecessor(&header)?;
        }
        Ok(header)
    }
}
