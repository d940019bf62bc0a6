//! Storage module for consensus
//!
//! This module provides an in-memory header index implementing the
//! header lookup used by difficulty validation.

pub mod header_store;

pub use header_store::InMemoryHeaderStore;
