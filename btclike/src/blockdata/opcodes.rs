// SPDX-License-Identifier: CC0-1.0

//! Opcodes.
//!
//! The handful of script opcodes the supported locking scripts are built from.

/// Push an empty array onto the stack.
pub const OP_0: u8 = 0x00;
/// Duplicate the top stack item.
pub const OP_DUP: u8 = 0x76;
/// Pop the top stack item and push its RIPEMD160(SHA256) hash.
pub const OP_HASH160: u8 = 0xa9;
/// Push 1 if the top two stack items are equal, 0 otherwise.
pub const OP_EQUAL: u8 = 0x87;
/// Same as `OP_EQUAL` followed by `OP_VERIFY`.
pub const OP_EQUALVERIFY: u8 = 0x88;
/// Pop a public key and a signature and push whether the signature is valid.
pub const OP_CHECKSIG: u8 = 0xac;
/// Push the next 20 bytes onto the stack.
pub const OP_PUSHBYTES_20: u8 = 0x14;
/// Largest opcode that is a direct push of its own length.
pub const OP_PUSHBYTES_75: u8 = 0x4b;
/// Push the next byte as the length of the data to push.
pub const OP_PUSHDATA1: u8 = 0x4c;
