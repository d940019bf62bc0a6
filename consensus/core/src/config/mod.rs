//! Network profile configuration
//!
//! Built-in parameters for the supported networks plus TOML loading for
//! custom profiles.

pub mod constants;
pub mod params;

pub use params::{NetworkProfile, ProfileConfig, RetargetVariant};
