//! Core types for proof-of-work difficulty transition validation
//!
//! This crate holds the data shared by the codec and the validator:
//! header references, the chain lookup seam, network profiles and the
//! error taxonomy.

pub mod api;
pub mod config;
pub mod errors;
pub mod hash;
pub mod header;
pub mod network;

pub use api::HeaderLookup;
pub use config::params::{NetworkProfile, RetargetVariant};
pub use errors::{DifficultyError, DifficultyResult, ProfileError};
pub use hash::{Hash, ZERO_HASH};
pub use header::{BlockCandidate, HeaderRef};
pub use network::NetworkType;
