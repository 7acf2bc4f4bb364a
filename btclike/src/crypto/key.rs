// SPDX-License-Identifier: CC0-1.0

//! Bitcoin-like private keys.
//!
//! This module provides [`PrivateKey`], a secp256k1 secret key bound to a chain and a public key
//! serialization format, with WIF import/export and ECDSA signing of signature hashes.

use core::fmt;
use core::str::FromStr;

use btclike_network::Network;
use secp256k1::{Message, PublicKey, SECP256K1, SecretKey, ecdsa};

use crate::hash_types::PubkeyHash;

/// WIF decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Base58 decoding or checksum failure.
    #[error("base58 error: {0}")]
    Base58(#[from] bs58::decode::Error),
    /// The version byte does not belong to the expected chain.
    #[error("wrong WIF prefix: expected {expected:#04x}, got {actual:#04x}")]
    WrongPrefix {
        /// Version byte of the expected network.
        expected: u8,
        /// Version byte found in the string.
        actual: u8,
    },
    /// The version byte belongs to none of the supported chains.
    #[error("unknown WIF prefix {0:#04x}")]
    UnknownPrefix(u8),
    /// The payload is neither 33 nor 34 bytes long.
    #[error("invalid WIF payload length {0}")]
    InvalidLength(usize),
    /// A 34 byte payload whose last byte isn't the compression flag.
    #[error("invalid WIF compression flag {0:#04x}")]
    InvalidCompressionFlag(u8),
    /// The scalar is zero or not below the curve order.
    #[error(transparent)]
    Secp256k1(#[from] secp256k1::Error),
}

/// A private key together with the chain it is used on.
///
/// `compressed` selects the public key serialization that is hashed into addresses and pushed in
/// unlocking scripts.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// Whether this private key should be serialized as compressed.
    pub compressed: bool,
    /// The network on which this key should be used.
    pub network: Network,
    /// The actual ECDSA key.
    pub inner: SecretKey,
}

impl PrivateKey {
    /// Constructs compressed ECDSA private key from the provided generic Secp256k1 private key
    /// and the specified network.
    #[inline]
    pub fn new(key: SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: true,
            network,
            inner: key,
        }
    }

    /// Constructs uncompressed (legacy) ECDSA private key from the provided generic Secp256k1
    /// private key and the specified network.
    #[inline]
    pub fn new_uncompressed(key: SecretKey, network: Network) -> PrivateKey {
        PrivateKey {
            compressed: false,
            network,
            inner: key,
        }
    }

    /// Deserializes a compressed private key from a 32 byte slice.
    pub fn from_slice(data: &[u8], network: Network) -> Result<PrivateKey, Error> {
        Ok(PrivateKey::new(SecretKey::from_slice(data)?, network))
    }

    /// Returns the secp256k1 public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(SECP256K1, &self.inner)
    }

    /// Serializes the public key in the format selected by `compressed`.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let pk = self.public_key();
        if self.compressed {
            pk.serialize().to_vec()
        } else {
            pk.serialize_uncompressed().to_vec()
        }
    }

    /// Hash160 of [`PrivateKey::public_key_bytes`].
    pub fn pubkey_hash(&self) -> PubkeyHash {
        PubkeyHash::of_public_key(&self.public_key_bytes())
    }

    /// Serializes the private key to bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.inner.secret_bytes()
    }

    /// Formats the private key to WIF.
    pub fn to_wif(self) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(self.network.params().wif_version);
        payload.extend_from_slice(&self.inner.secret_bytes());
        if self.compressed {
            payload.push(1);
        }
        bs58::encode(payload).with_check().into_string()
    }

    /// Parses a WIF string of any supported chain.
    ///
    /// The version byte picks the network. Bitcoin Cash shares its WIF version with Bitcoin, so
    /// such keys come back as [`Network::Bitcoin`]; use [`PrivateKey::from_wif_with_network`] to
    /// pin the chain.
    pub fn from_wif(wif: &str) -> Result<PrivateKey, Error> {
        let payload = bs58::decode(wif).with_check(None).into_vec()?;
        let version = *payload.first().ok_or(Error::InvalidLength(0))?;
        let network = Network::ALL
            .into_iter()
            .find(|network| network.params().wif_version == version)
            .ok_or(Error::UnknownPrefix(version))?;
        PrivateKey::from_wif_payload(&payload, network)
    }

    /// Parses a WIF string, requiring the version byte of `network`.
    pub fn from_wif_with_network(wif: &str, network: Network) -> Result<PrivateKey, Error> {
        let payload = bs58::decode(wif).with_check(None).into_vec()?;
        let expected = network.params().wif_version;
        match payload.first() {
            Some(&actual) if actual != expected => Err(Error::WrongPrefix {
                expected,
                actual,
            }),
            _ => PrivateKey::from_wif_payload(&payload, network),
        }
    }

    fn from_wif_payload(payload: &[u8], network: Network) -> Result<PrivateKey, Error> {
        let compressed = match payload.len() {
            33 => false,
            34 => match payload[33] {
                1 => true,
                flag => return Err(Error::InvalidCompressionFlag(flag)),
            },
            len => return Err(Error::InvalidLength(len)),
        };
        Ok(PrivateKey {
            compressed,
            network,
            inner: SecretKey::from_slice(&payload[1..33])?,
        })
    }

    /// Signs a signature hash, returning a low-S signature with an RFC6979 nonce.
    pub fn sign_ecdsa(&self, sighash: [u8; 32]) -> ecdsa::Signature {
        let msg = Message::from_digest(sighash);
        let mut sig = SECP256K1.sign_ecdsa(&msg, &self.inner);
        sig.normalize_s();
        sig
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("compressed", &self.compressed)
            .field("network", &self.network)
            .field("inner", &"[redacted]")
            .finish()
    }
}

impl FromStr for PrivateKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<PrivateKey, Error> {
        PrivateKey::from_wif(s)
    }
}
