// SPDX-License-Identifier: CC0-1.0

//! Cryptography
//!
//! Cryptography related functionality: keys and signature hashes.

pub mod key;
pub mod sighash;
