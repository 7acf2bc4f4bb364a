// SPDX-License-Identifier: CC0-1.0

//! Hash newtypes.
//!
//! Distinct types for the different uses of the same hash functions, so a script hash can't be
//! passed where a public key hash is expected.

use hashes::{hash160, hash_newtype, sha256d};

hash_newtype! {
    /// A transaction identifier.
    ///
    /// The inner bytes are in wire order; `Display` and `FromStr` use the reversed form shown by
    /// block explorers.
    #[hash_newtype(backward)]
    pub struct Txid(sha256d::Hash);

    /// A hash of a public key.
    pub struct PubkeyHash(hash160::Hash);

    /// A hash of a redeem script.
    pub struct ScriptHash(hash160::Hash);
}

impl PubkeyHash {
    /// Hashes a serialized public key.
    pub fn of_public_key(serialized: &[u8]) -> PubkeyHash {
        use hashes::Hash;
        PubkeyHash::hash(serialized)
    }
}
