use crate::Hash;
use thiserror::Error;

/// Reasons a candidate block's declared difficulty is rejected.
///
/// Every variant is terminal for the candidate; none is retried
/// internally. Mismatch variants carry both compact values, rendered in
/// hex.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("Malformed compact target {0:x}")]
    MalformedTarget(u32),

    #[error("Difficulty transition point but we did not find a way back to the genesis block: header {missing} is unknown after {walked} of {steps} steps back from height {from_height}")]
    ChainTooShort {
        from_height: u64,
        steps: u64,
        walked: u64,
        missing: Hash,
    },

    #[error("Predecessor {0} of the candidate block is unknown")]
    UnknownPredecessor(Hash),

    #[error("Unexpected change in difficulty at height {height}: {declared:x} vs {expected:x}")]
    UnexpectedDifficultyChange { height: u64, declared: u32, expected: u32 },

    #[error("Network provided difficulty bits do not match what was calculated: {computed:x} vs {declared:x}")]
    DifficultyMismatch { computed: u32, declared: u32 },

    #[error("Testnet block transition that is not allowed: {expected:x} vs {declared:x}")]
    TestnetExceptionViolation { expected: u32, declared: u32 },
}

impl DifficultyError {
    /// True when the local chain view is incomplete rather than the block
    /// being wrong. The caller has to resync before validating again.
    pub fn is_chain_integrity_fault(&self) -> bool {
        matches!(self, DifficultyError::ChainTooShort { .. } | DifficultyError::UnknownPredecessor(_))
    }
}

pub type DifficultyResult<T> = Result<T, DifficultyError>;

/// Errors raised while building a network profile from configuration.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Failed to parse profile config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid max target {0:?}: expected a hex number of at most 256 bits")]
    InvalidMaxTarget(String),

    #[error("Target spacing must be positive")]
    ZeroSpacing,

    #[error("Target timespan {timespan} is shorter than the target spacing {spacing}")]
    TimespanShorterThanSpacing { timespan: u64, spacing: u64 },

    #[error("Target timespan {timespan} exceeds the supported maximum {max}")]
    TimespanTooLarge { timespan: u64, max: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_messages_carry_hex_values() {
        let err = DifficultyError::DifficultyMismatch { computed: 0x1d00d86a, declared: 0x1d00ffff };
        assert_eq!(
            err.to_string(),
            "Network provided difficulty bits do not match what was calculated: 1d00d86a vs 1d00ffff"
        );

        let err = DifficultyError::UnexpectedDifficultyChange { height: 10, declared: 0x1e0fffff, expected: 0x1e0ffff0 };
        assert_eq!(err.to_string(), "Unexpected change in difficulty at height 10: 1e0fffff vs 1e0ffff0");
    }

    #[test]
    fn only_missing_headers_are_integrity_faults() {
        let short = DifficultyError::ChainTooShort { from_height: 5, steps: 10, walked: 5, missing: Hash::default() };
        assert!(short.is_chain_integrity_fault());
        assert!(DifficultyError::UnknownPredecessor(Hash::default()).is_chain_integrity_fault());
        assert!(!DifficultyError::MalformedTarget(0x04923456).is_chain_integrity_fault());
    }
}
