// SPDX-License-Identifier: CC0-1.0

//! Consensus encoding.
//!
//! Only the write half is needed: transactions are assembled locally and never parsed back.

pub mod encode;

pub use self::encode::{Encodable, VarInt, serialize, serialize_hex};
