//! BIP32 seed implementation
//!
//! A seed is the root entropy of a key tree. BIP39 mnemonics produce 64 byte seeds, raw seeds of
//! any length from [`MIN_SEED_LEN`] bytes up are accepted.

use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bip32::{ExtendedKey, MIN_SEED_LEN};
use crate::error::{Error, Result};

/// Length of a seed produced from a BIP39 mnemonic.
pub const MNEMONIC_SEED_LEN: usize = 64;

/// Root entropy of an HD key tree
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Seed(Vec<u8>);

impl Seed {
    /// Create a seed from a BIP39 seed
    pub fn new(bytes: [u8; MNEMONIC_SEED_LEN]) -> Self {
        Self(bytes.to_vec())
    }

    /// Create a seed from a slice
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() < MIN_SEED_LEN {
            return Err(Error::InvalidParameter(format!(
                "Invalid seed length: expected at least {} bytes, got {}",
                MIN_SEED_LEN,
                slice.len()
            )));
        }
        Ok(Self(slice.to_vec()))
    }

    /// Get the seed as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Seed length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false, seeds are never shorter than [`MIN_SEED_LEN`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Create a seed from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::InvalidParameter(format!("Invalid hex: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Check if the seed is all zeros
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// The master key of the tree this seed roots
    pub fn to_master_key(&self) -> Result<ExtendedKey> {
        Ok(ExtendedKey::new_master(&self.0)?)
    }
}

impl From<[u8; MNEMONIC_SEED_LEN]> for Seed {
    fn from(bytes: [u8; MNEMONIC_SEED_LEN]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(***)")
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // first and last 4 bytes only
        let end = self.0.len() - 4;
        write!(f, "Seed({}...{})", hex::encode(&self.0[..4]), hex::encode(&self.0[end..]))
    }
}

impl FromStr for Seed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String as Deserialize>::deserialize(deserializer)?;
            Seed::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8> as Deserialize>::deserialize(deserializer)?;
            Seed::from_slice(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
