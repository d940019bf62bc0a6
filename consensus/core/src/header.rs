//! Header views consumed by difficulty validation
//!
//! Headers are owned by the chain store; validation only reads the few
//! fields that matter for proof-of-work retargeting.

use crate::hash::{Hash, ZERO_HASH};
use serde::{Deserialize, Serialize};

/// Reference to an already validated header in the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderRef {
    /// Height of the header, genesis is 0
    pub height: u64,
    /// Block timestamp in seconds since the unix epoch
    pub timestamp: u64,
    /// Declared compact difficulty target
    pub bits: u32,
    /// Hash of this header
    pub hash: Hash,
    /// Hash of the predecessor header
    pub prev_hash: Hash,
}

impl HeaderRef {
    pub fn new(height: u64, timestamp: u64, bits: u32, hash: Hash, prev_hash: Hash) -> Self {
        Self { height, timestamp, bits, hash, prev_hash }
    }

    /// Creates a genesis header reference (height 0, zero predecessor).
    pub fn genesis(timestamp: u64, bits: u32, hash: Hash) -> Self {
        Self::new(0, timestamp, bits, hash, ZERO_HASH)
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}

/// The parts of a candidate block needed to check its declared difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockCandidate {
    /// Hash of the accepted predecessor
    pub prev_hash: Hash,
    /// Block timestamp in seconds since the unix epoch
    pub timestamp: u64,
    /// Declared compact difficulty target
    pub bits: u32,
}

impl BlockCandidate {
    pub fn new(prev_hash: Hash, timestamp: u64, bits: u32) -> Self {
        Self { prev_hash, timestamp, bits }
    }

    /// Builds a candidate that extends `prev`.
    pub fn on_top_of(prev: &HeaderRef, timestamp: u64, bits: u32) -> Self {
        Self::new(prev.hash, timestamp, bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_has_zero_predecessor() {
        let genesis = HeaderRef::genesis(1_486_949_366, 0x1e0ffff0, Hash::from_u64_word(1));
        assert!(genesis.is_genesis());
        assert_eq!(genesis.prev_hash, ZERO_HASH);
    }

    #[test]
    fn candidate_links_to_predecessor() {
        let prev = HeaderRef::new(7, 1000, 0x1d00ffff, Hash::from_u64_word(8), Hash::from_u64_word(7));
        let candidate = BlockCandidate::on_top_of(&prev, 1150, 0x1d00ffff);
        assert_eq!(candidate.prev_hash, prev.hash);
    }
}
