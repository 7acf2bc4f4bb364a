// SPDX-License-Identifier: CC0-1.0

//! CashAddr encoding.
//!
//! The Bitcoin Cash address format: a prefix, a `:` separator and a base32 string carrying a
//! version byte, a hash and a 40 bit BCH checksum. Only 160 bit hashes are supported.

use bech32::u5;
use bech32::{FromBase32, ToBase32};

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATORS: [u64; 5] =
    [0x98f2bc8e61, 0x79b76d99e2, 0xf33e5fb3c4, 0xae2eabe2a8, 0x1e4f43e470];

const CHECKSUM_LEN: usize = 8;

/// Version byte type bits of a P2PKH payload.
pub const TYPE_P2PKH: u8 = 0;
/// Version byte type bits of a P2SH payload.
pub const TYPE_P2SH: u8 = 1;

/// CashAddr errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A character outside the CashAddr charset.
    #[error("invalid cashaddr character {0:?}")]
    InvalidChar(char),
    /// Upper and lower case characters mixed.
    #[error("mixed case cashaddr string")]
    MixedCase,
    /// The prefix before `:` isn't the expected one.
    #[error("wrong cashaddr prefix: expected {expected}, got {actual}")]
    WrongPrefix {
        /// Prefix of the network.
        expected: String,
        /// Prefix found in the string.
        actual: String,
    },
    /// Checksum mismatch.
    #[error("invalid cashaddr checksum")]
    InvalidChecksum,
    /// Bad base32 padding or too short data.
    #[error("invalid cashaddr payload")]
    InvalidPayload,
    /// The version byte announces a hash size other than 160 bits or an unknown type.
    #[error("unsupported cashaddr version byte {0:#04x}")]
    UnsupportedVersion(u8),
}

fn polymod(values: impl Iterator<Item = u8>) -> u64 {
    let mut c: u64 = 1;
    for d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << i) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(core::iter::once(0))
}

/// Encodes a 20 byte hash of the given type, without the prefix in the output.
pub fn encode(prefix: &str, type_bits: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(type_bits << 3);
    payload.extend_from_slice(hash);
    let data: Vec<u8> = payload.to_base32().into_iter().map(u5::to_u8).collect();

    let checksum = polymod(prefix_values(prefix).chain(data.iter().copied()).chain([0; CHECKSUM_LEN]));
    data.iter()
        .copied()
        .chain((0..CHECKSUM_LEN).map(|i| ((checksum >> (5 * (7 - i))) & 0x1f) as u8))
        .map(|v| CHARSET[v as usize] as char)
        .collect()
}

/// Decodes a CashAddr string, with or without its prefix, into the type bits and the hash.
pub fn decode(prefix: &str, address: &str) -> Result<(u8, [u8; 20]), Error> {
    let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let address = address.to_ascii_lowercase();
    let body = match address.split_once(':') {
        Some((actual, body)) if actual == prefix => body,
        Some((actual, _)) => {
            return Err(Error::WrongPrefix {
                expected: prefix.to_owned(),
                actual: actual.to_owned(),
            });
        }
        None => address.as_str(),
    };

    let values = body
        .chars()
        .map(|c| {
            CHARSET.iter().position(|&x| x as char == c).map(|p| p as u8).ok_or(Error::InvalidChar(c))
        })
        .collect::<Result<Vec<u8>, Error>>()?;
    if values.len() <= CHECKSUM_LEN {
        return Err(Error::InvalidPayload);
    }
    if polymod(prefix_values(prefix).chain(values.iter().copied())) != 0 {
        return Err(Error::InvalidChecksum);
    }

    let data = values[..values.len() - CHECKSUM_LEN]
        .iter()
        .map(|&v| u5::try_from_u8(v).map_err(|_| Error::InvalidPayload))
        .collect::<Result<Vec<u5>, Error>>()?;
    let payload = Vec::<u8>::from_base32(&data).map_err(|_| Error::InvalidPayload)?;

    let version = *payload.first().ok_or(Error::InvalidPayload)?;
    // size bits 0 mean a 160 bit hash
    if version & 0x07 != 0 || version >> 3 > TYPE_P2SH || payload.len() != 21 {
        return Err(Error::UnsupportedVersion(version));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((version >> 3, hash))
}
