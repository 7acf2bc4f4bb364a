//! Test utilities for the btclike workspace
//!
//! This crate holds the seeds, keys and signed transactions the crates of the
//! workspace are tested against, plus a few assertion macros.

pub mod fixtures;
pub mod macros;

pub use fixtures::*;
