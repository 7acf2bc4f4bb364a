// SPDX-License-Identifier: CC0-1.0

//! Blockdata.
//!
//! This module defines the structures that end up inside a transaction: scripts, inputs,
//! outputs and witnesses.

pub mod opcodes;
pub mod script;
pub mod transaction;
