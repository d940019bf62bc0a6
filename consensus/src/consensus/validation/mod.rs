//! Validation module for consensus
//!
//! This module validates the difficulty a block declares against the
//! retarget rules of its network.

pub mod transition_validator;

pub use transition_validator::TransitionValidator;
