// SPDX-License-Identifier: CC0-1.0

//! Addresses.
//!
//! Support for ordinary base58 addresses, bech32 version 0 witness addresses and, on Bitcoin
//! Cash, CashAddr strings. An [`Address`] resolves to the [`ScriptType`] and the 20 byte hash
//! needed to build the locking script that pays it.
//!
//! ```rust
//! use btclike::{Address, Network, ScriptType};
//!
//! let address = Address::from_str_with_network(
//!     "bc1qjfswr2pvpuu52j0t9a98n7w3tnjcd49t7a9te7",
//!     Network::Bitcoin,
//! )
//! .unwrap();
//! assert_eq!(address.script_type(), ScriptType::P2wpkh);
//! ```

pub mod cashaddr;

use core::fmt;

use bech32::{FromBase32, ToBase32, Variant, u5};
use btclike_network::Network;
use hashes::Hash;

use crate::blockdata::script::{ScriptBuf, ScriptType};
use crate::crypto::key::PrivateKey;
use crate::hash_types::{PubkeyHash, ScriptHash};

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Address parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Empty input.
    #[error("empty address")]
    Empty,
    /// A character outside the base58 alphabet.
    #[error("address contains non-base58 character {0:?}")]
    NotBase58(char),
    /// Base58Check decoding failed, usually a checksum mismatch.
    #[error("base58 error: {0}")]
    Base58(#[from] bs58::decode::Error),
    /// The version byte is neither the chain's P2PKH nor its P2SH version.
    #[error("wrong address prefix {0}")]
    WrongPrefix(u8),
    /// The base58 payload isn't a version byte followed by a 20 byte hash.
    #[error("invalid address payload length {0}")]
    InvalidLength(usize),
    /// Bech32 decoding failed.
    #[error("bech32 error: {0}")]
    Bech32(bech32::Error),
    /// The human-readable part belongs to another chain.
    #[error("wrong bech32 human-readable part: expected {expected}, got {actual}")]
    WrongHrp {
        /// The chain's segwit prefix.
        expected: &'static str,
        /// The prefix found in the string.
        actual: String,
    },
    /// Witness version other than 0.
    #[error("unsupported witness version {0}")]
    UnsupportedWitnessVersion(u8),
    /// A version 0 program encoded as bech32m.
    #[error("witness version 0 must use the bech32 checksum")]
    InvalidBech32Variant,
    /// Only 20 byte programs (P2WPKH) are supported.
    #[error("unsupported witness program length {0}")]
    UnsupportedWitnessProgramLength(usize),
    /// The chain never adopted segwit.
    #[error("{network} has no segwit addresses")]
    SegwitUnsupported {
        /// The chain asked for.
        network: Network,
    },
    /// Witness outputs commit to compressed keys only.
    #[error("witness addresses require a compressed public key")]
    UncompressedKey,
    /// CashAddr decoding failed.
    #[error("cashaddr error: {0}")]
    CashAddr(#[from] cashaddr::Error),
}

impl From<bech32::Error> for Error {
    fn from(e: bech32::Error) -> Self {
        Error::Bech32(e)
    }
}

/// The method used to produce an address.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Payload {
    /// P2PKH address.
    PubkeyHash(PubkeyHash),
    /// P2SH address.
    ScriptHash(ScriptHash),
    /// Version 0 witness program of a key hash.
    WitnessProgram([u8; 20]),
}

impl Payload {
    /// The script type paying to this payload.
    pub fn script_type(&self) -> ScriptType {
        match self {
            Payload::PubkeyHash(_) => ScriptType::P2pkh,
            Payload::ScriptHash(_) => ScriptType::P2sh,
            Payload::WitnessProgram(_) => ScriptType::P2wpkh,
        }
    }

    /// The 20 byte hash embedded in the locking script.
    pub fn hash(&self) -> [u8; 20] {
        match self {
            Payload::PubkeyHash(hash) => hash.to_byte_array(),
            Payload::ScriptHash(hash) => hash.to_byte_array(),
            Payload::WitnessProgram(program) => *program,
        }
    }
}

/// A destination on one of the supported chains.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Address {
    /// The network on which this address is usable.
    pub network: Network,
    /// The type of the address.
    pub payload: Payload,
}

impl Address {
    /// Creates a pay to public key hash address.
    pub fn p2pkh(pubkey_hash: PubkeyHash, network: Network) -> Address {
        Address {
            network,
            payload: Payload::PubkeyHash(pubkey_hash),
        }
    }

    /// Creates a pay to script hash address from the hash of a redeem script.
    pub fn p2sh_from_hash(script_hash: ScriptHash, network: Network) -> Address {
        Address {
            network,
            payload: Payload::ScriptHash(script_hash),
        }
    }

    /// Creates a witness pay to public key hash address.
    ///
    /// The hash must be the hash160 of a compressed public key.
    pub fn p2wpkh(pubkey_hash: PubkeyHash, network: Network) -> Result<Address, Error> {
        if !network.params().supports_segwit() {
            return Err(Error::SegwitUnsupported {
                network,
            });
        }
        Ok(Address {
            network,
            payload: Payload::WitnessProgram(pubkey_hash.to_byte_array()),
        })
    }

    /// Creates a P2SH address wrapping a P2WPKH redeem script (`0 <pkh>`).
    pub fn p2shwpkh(pubkey_hash: PubkeyHash, network: Network) -> Result<Address, Error> {
        if !network.params().supports_segwit() {
            return Err(Error::SegwitUnsupported {
                network,
            });
        }
        let redeem_script = ScriptBuf::new_v0_p2wpkh(pubkey_hash.as_byte_array());
        Ok(Address::p2sh_from_hash(ScriptHash::hash(redeem_script.as_bytes()), network))
    }

    /// The address a private key receives on with the given script type.
    pub fn from_private_key(key: &PrivateKey, script_type: ScriptType) -> Result<Address, Error> {
        if script_type.is_witness() && !key.compressed {
            return Err(Error::UncompressedKey);
        }
        let pubkey_hash = key.pubkey_hash();
        match script_type {
            ScriptType::P2pkh => Ok(Address::p2pkh(pubkey_hash, key.network)),
            ScriptType::P2sh => Address::p2shwpkh(pubkey_hash, key.network),
            ScriptType::P2wpkh => Address::p2wpkh(pubkey_hash, key.network),
        }
    }

    /// Parses a destination string of `network`.
    ///
    /// Strings starting with the chain's segwit prefix are decoded as bech32. On chains with a
    /// CashAddr prefix strings that look like CashAddr (a `:` separator or a leading `q`/`p`) are
    /// decoded as such. Everything else must be Base58Check with the chain's P2PKH or P2SH
    /// version byte.
    pub fn from_str_with_network(s: &str, network: Network) -> Result<Address, Error> {
        if s.is_empty() {
            return Err(Error::Empty);
        }
        let params = network.params();

        if let Some(hrp) = params.segwit_hrp {
            let lower = s.to_ascii_lowercase();
            if lower.starts_with(hrp) && lower[hrp.len()..].starts_with('1') {
                return Address::from_bech32(s, hrp, network);
            }
        }

        if let Some(prefix) = params.cashaddr_prefix {
            if s.contains(':') || s.starts_with(['q', 'p', 'Q', 'P']) {
                let (type_bits, hash) = cashaddr::decode(prefix, s)?;
                let payload = match type_bits {
                    cashaddr::TYPE_P2PKH => Payload::PubkeyHash(PubkeyHash::from_byte_array(hash)),
                    _ => Payload::ScriptHash(ScriptHash::from_byte_array(hash)),
                };
                return Ok(Address {
                    network,
                    payload,
                });
            }
        }

        if let Some(c) = s.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
            return Err(Error::NotBase58(c));
        }
        let data = bs58::decode(s).with_check(None).into_vec()?;
        if data.len() != 21 {
            return Err(Error::InvalidLength(data.len()));
        }
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&data[1..]);
        let payload = match data[0] {
            v if v == params.address_version => {
                Payload::PubkeyHash(PubkeyHash::from_byte_array(hash))
            }
            v if v == params.p2sh_version => Payload::ScriptHash(ScriptHash::from_byte_array(hash)),
            v => return Err(Error::WrongPrefix(v)),
        };
        Ok(Address {
            network,
            payload,
        })
    }

    fn from_bech32(s: &str, expected: &'static str, network: Network) -> Result<Address, Error> {
        let (hrp, data, variant) = bech32::decode(s)?;
        if hrp != expected {
            return Err(Error::WrongHrp {
                expected,
                actual: hrp,
            });
        }
        let (version, program) = data.split_first().ok_or(Error::Bech32(bech32::Error::InvalidLength))?;
        if version.to_u8() != 0 {
            return Err(Error::UnsupportedWitnessVersion(version.to_u8()));
        }
        if variant != Variant::Bech32 {
            return Err(Error::InvalidBech32Variant);
        }
        let program = Vec::<u8>::from_base32(program)?;
        let program: [u8; 20] = program
            .as_slice()
            .try_into()
            .map_err(|_| Error::UnsupportedWitnessProgramLength(program.len()))?;
        Ok(Address {
            network,
            payload: Payload::WitnessProgram(program),
        })
    }

    /// The script type of the locking script paying this address.
    pub fn script_type(&self) -> ScriptType {
        self.payload.script_type()
    }

    /// The 20 byte hash carried by the address.
    pub fn payload_hash(&self) -> [u8; 20] {
        self.payload.hash()
    }

    /// Generates a script pubkey spending to this address.
    pub fn script_pubkey(&self) -> ScriptBuf {
        self.script_type().locking_script(&self.payload_hash())
    }

    /// Renders the address in CashAddr form, prefix included.
    ///
    /// Returns `None` on chains without a CashAddr prefix.
    pub fn to_cashaddr(&self) -> Option<String> {
        let prefix = self.network.params().cashaddr_prefix?;
        let type_bits = match self.payload {
            Payload::PubkeyHash(_) => cashaddr::TYPE_P2PKH,
            Payload::ScriptHash(_) => cashaddr::TYPE_P2SH,
            Payload::WitnessProgram(_) => return None,
        };
        Some(format!("{}:{}", prefix, cashaddr::encode(prefix, type_bits, &self.payload_hash())))
    }
}

/// Base58 for P2PKH and P2SH, bech32 for witness programs.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.network.params();
        let version = match self.payload {
            Payload::PubkeyHash(_) => params.address_version,
            Payload::ScriptHash(_) => params.p2sh_version,
            Payload::WitnessProgram(ref program) => {
                let hrp = params.segwit_hrp.ok_or(fmt::Error)?;
                let mut data = vec![u5::try_from_u8(0).map_err(|_| fmt::Error)?];
                data.extend(program.to_base32());
                let encoded = bech32::encode(hrp, data, Variant::Bech32).map_err(|_| fmt::Error)?;
                return f.write_str(&encoded);
            }
        };
        let mut prefixed = [0u8; 21];
        prefixed[0] = version;
        prefixed[1..].copy_from_slice(&self.payload_hash());
        f.write_str(&bs58::encode(prefixed).with_check().into_string())
    }
}
