//! Proof-of-work targets and their compact encoding
//!
//! [`Target`] wraps the 256-bit threshold a block hash must not exceed.
//! The [`compact`] module converts it to and from the 32-bit form stored
//! in block headers.

pub mod compact;

pub use compact::{decode_compact, encode_compact, precision_mask};

use primitive_types::U256;
use retarget_core::DifficultyResult;
use std::fmt;

/// Target represents the difficulty threshold for valid blocks
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Target(U256);

impl Target {
    /// Creates a new Target from a U256 value
    pub fn new(value: U256) -> Self {
        Target(value)
    }

    /// Decodes a compact target, failing on negative or oversized values.
    pub fn from_compact(bits: u32) -> DifficultyResult<Self> {
        decode_compact(bits).map(Target)
    }

    /// Lossy compact encoding, see [`encode_compact`].
    pub fn to_compact(&self) -> u32 {
        encode_compact(self.0)
    }

    /// Drops the bits that a compact value with the exponent of
    /// `declared` cannot represent.
    pub fn reduce_precision(self, declared: u32) -> Self {
        Target(self.0 & precision_mask(declared))
    }

    /// Returns the inner U256 value
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<U256> for Target {
    fn from(value: U256) -> Self {
        Target(value)
    }
}

impl From<Target> for U256 {
    fn from(target: Target) -> Self {
        target.0
    }
}

impl fmt::LowerHex for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
