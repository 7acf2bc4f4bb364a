// SPDX-License-Identifier: CC0-1.0

//! Bitcoin scripts.
//!
//! Scripts define Bitcoin's digital signature scheme: a signature is formed
//! from a script (the second half of which is defined by a coin to be spent,
//! and the first half provided by the spending transaction), and is valid iff
//! the script leaves `TRUE` on the stack after being evaluated.
//!
//! This module only knows the three locking script shapes a wallet of this kind spends from and
//! pays to: P2PKH, P2SH and P2WPKH. See [`ScriptType::classify`].

use core::fmt;
use std::io;

use crate::blockdata::opcodes::*;
use crate::consensus::Encodable;
use crate::hash_types::{PubkeyHash, ScriptHash};

/// An owned, growable script.
#[derive(Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptBuf(Vec<u8>);

impl ScriptBuf {
    /// Creates a new empty script.
    pub const fn new() -> Self {
        ScriptBuf(Vec::new())
    }

    /// Wraps raw script bytes without checking them.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        ScriptBuf(bytes)
    }

    /// Parses a hex-encoded script.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(ScriptBuf)
    }

    /// Generates a P2PKH-type of scriptPubkey.
    pub fn new_p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        Builder::new()
            .push_opcode(OP_DUP)
            .push_opcode(OP_HASH160)
            .push_slice(pubkey_hash)
            .push_opcode(OP_EQUALVERIFY)
            .push_opcode(OP_CHECKSIG)
            .into_script()
    }

    /// Generates a P2SH-type of scriptPubkey with a given hash of the redeem script.
    pub fn new_p2sh(script_hash: &[u8; 20]) -> Self {
        Builder::new()
            .push_opcode(OP_HASH160)
            .push_slice(script_hash)
            .push_opcode(OP_EQUAL)
            .into_script()
    }

    /// Generates P2WPKH-type of scriptPubkey.
    pub fn new_v0_p2wpkh(pubkey_hash: &[u8; 20]) -> Self {
        Builder::new().push_opcode(OP_0).push_slice(pubkey_hash).into_script()
    }

    /// Returns the script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Converts the script into its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length in bytes of the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the script is the empty script.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for ScriptBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ScriptBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

impl fmt::Display for ScriptBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::LowerHex for ScriptBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl Encodable for ScriptBuf {
    #[inline]
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.0.consensus_encode(w)
    }
}

/// An object which can be used to construct a script piece by piece.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    /// Creates a new empty script.
    pub fn new() -> Self {
        Builder(Vec::new())
    }

    /// Adds a single opcode to the script.
    pub fn push_opcode(mut self, opcode: u8) -> Builder {
        self.0.push(opcode);
        self
    }

    /// Adds instructions to push some arbitrary data onto the stack.
    pub fn push_slice(mut self, data: &[u8]) -> Builder {
        match data.len() {
            n if n <= OP_PUSHBYTES_75 as usize => self.0.push(n as u8),
            n if n <= 0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(n as u8);
            }
            n => {
                self.0.push(OP_PUSHDATA1 + 1);
                self.0.extend_from_slice(&(n as u16).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Converts the `Builder` into `ScriptBuf`.
    pub fn into_script(self) -> ScriptBuf {
        ScriptBuf(self.0)
    }
}

/// Script classification and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The locking script has no bytes at all.
    #[error("locking script is empty")]
    Empty,
    /// The script is not one of P2PKH, P2SH or P2WPKH.
    #[error("unsupported locking script {0}")]
    Unsupported(String),
    /// The push opcode in front of a 20 byte hash isn't a 20 byte push.
    #[error("wrong push size in {script_type} locking script: expected {expected}, got {actual}")]
    WrongPushSize {
        /// Script shape the bytes were recognized as.
        script_type: ScriptType,
        /// Size of the embedded hash.
        expected: usize,
        /// Push size declared in the script.
        actual: usize,
    },
    /// A witness program that isn't the hash of the key spending it.
    #[error("witness program {program} does not match spending key hash {expected}")]
    KeyHashMismatch {
        /// Hex of the program found in the script.
        program: String,
        /// Hash of the spending key.
        expected: PubkeyHash,
    },
    /// A P2SH hash that isn't the spending key's nested P2WPKH redeem script.
    #[error("script hash {script_hash} does not match spending key redeem script hash {expected}")]
    RedeemScriptMismatch {
        /// Hex of the hash found in the script.
        script_hash: String,
        /// Hash of `0 <key hash>`.
        expected: ScriptHash,
    },
}

/// The locking script shapes this library can produce and spend.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum ScriptType {
    /// Pay to public key hash.
    P2pkh,
    /// Pay to script hash. Spends are nested P2SH-P2WPKH.
    P2sh,
    /// Pay to witness public key hash, version 0.
    P2wpkh,
}

impl ScriptType {
    /// Recognizes the shape of a locking script.
    ///
    /// Every shape embeds exactly 20 bytes of hash. A 20 byte body behind any other push opcode
    /// is [`Error::WrongPushSize`], every other byte sequence is [`Error::Unsupported`].
    pub fn classify(script: &[u8]) -> Result<ScriptType, Error> {
        if script.is_empty() {
            return Err(Error::Empty);
        }

        let (script_type, push) = match script {
            [OP_DUP, OP_HASH160, push, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG]
                if hash.len() == 20 =>
            {
                (ScriptType::P2pkh, *push)
            }
            [OP_HASH160, push, hash @ .., OP_EQUAL] if hash.len() == 20 => {
                (ScriptType::P2sh, *push)
            }
            [OP_0, push, hash @ ..] if hash.len() == 20 => (ScriptType::P2wpkh, *push),
            _ => return Err(Error::Unsupported(hex::encode(script))),
        };

        if push != OP_PUSHBYTES_20 {
            return Err(Error::WrongPushSize {
                script_type,
                expected: 20,
                actual: push as usize,
            });
        }
        Ok(script_type)
    }

    /// Classifies a locking script offered by `key_hash` as a spend source.
    ///
    /// A P2WPKH program must be the spender's own key hash, a P2SH hash must be the hash of the
    /// spender's nested P2WPKH redeem script.
    pub fn classify_for_key(script: &[u8], key_hash: &PubkeyHash) -> Result<ScriptType, Error> {
        use hashes::Hash;

        let script_type = ScriptType::classify(script)?;
        match script_type {
            ScriptType::P2pkh => {}
            ScriptType::P2sh => {
                let redeem_script = ScriptBuf::new_v0_p2wpkh(key_hash.as_byte_array());
                let expected = ScriptHash::hash(redeem_script.as_bytes());
                if &script[2..22] != expected.as_byte_array() {
                    return Err(Error::RedeemScriptMismatch {
                        script_hash: hex::encode(&script[2..22]),
                        expected,
                    });
                }
            }
            ScriptType::P2wpkh => {
                if &script[2..] != key_hash.as_byte_array() {
                    return Err(Error::KeyHashMismatch {
                        program: hex::encode(&script[2..]),
                        expected: *key_hash,
                    });
                }
            }
        }
        Ok(script_type)
    }

    /// Builds the canonical locking script of this type around a 20 byte hash.
    pub fn locking_script(self, hash: &[u8; 20]) -> ScriptBuf {
        match self {
            ScriptType::P2pkh => ScriptBuf::new_p2pkh(hash),
            ScriptType::P2sh => ScriptBuf::new_p2sh(hash),
            ScriptType::P2wpkh => ScriptBuf::new_v0_p2wpkh(hash),
        }
    }

    /// Whether spending this type puts the signature in the witness.
    pub fn is_witness(self) -> bool {
        match self {
            ScriptType::P2pkh => false,
            ScriptType::P2sh | ScriptType::P2wpkh => true,
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptType::P2pkh => f.write_str("p2pkh"),
            ScriptType::P2sh => f.write_str("p2sh"),
            ScriptType::P2wpkh => f.write_str("p2wpkh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hashes::Hash;
    use hex_lit::hex;

    use super::*;

    const PKH: [u8; 20] = hex!("9260e1a82c0f394549eb2f4a79f9d15ce586d4ab");

    #[test]
    fn locking_scripts() {
        assert_eq!(
            ScriptType::P2pkh.locking_script(&PKH).to_string(),
            "76a9149260e1a82c0f394549eb2f4a79f9d15ce586d4ab88ac"
        );
        assert_eq!(
            ScriptType::P2sh.locking_script(&PKH).to_string(),
            "a9149260e1a82c0f394549eb2f4a79f9d15ce586d4ab87"
        );
        assert_eq!(
            ScriptType::P2wpkh.locking_script(&PKH).to_string(),
            "00149260e1a82c0f394549eb2f4a79f9d15ce586d4ab"
        );
    }

    #[test]
    fn classify_known_shapes() {
        for script_type in [ScriptType::P2pkh, ScriptType::P2sh, ScriptType::P2wpkh] {
            let script = script_type.locking_script(&PKH);
            assert_eq!(ScriptType::classify(script.as_bytes()), Ok(script_type));
        }
        assert!(!ScriptType::P2pkh.is_witness());
        assert!(ScriptType::P2sh.is_witness());
        assert!(ScriptType::P2wpkh.is_witness());
    }

    #[test]
    fn classify_rejects_unknown_patterns() {
        assert_eq!(ScriptType::classify(&[]), Err(Error::Empty));
        // bare P2PK
        let p2pk = hex!("21034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1ac");
        assert_matches!(ScriptType::classify(&p2pk), Err(Error::Unsupported(_)));
        // OP_RETURN
        assert_matches!(ScriptType::classify(&hex!("6a0401020304")), Err(Error::Unsupported(_)));
        // P2WSH, 32 byte program
        let p2wsh = [&[0x00, 0x20][..], &[0x11; 32][..]].concat();
        assert_matches!(ScriptType::classify(&p2wsh), Err(Error::Unsupported(_)));
        assert_matches!(ScriptType::classify(&[0x76, 0xa9]), Err(Error::Unsupported(_)));

        // P2PKH and P2SH shapes around hashes that aren't 20 bytes
        assert_matches!(ScriptType::classify(&hex!("76a90088ac")), Err(Error::Unsupported(_)));
        assert_matches!(ScriptType::classify(&hex!("a90087")), Err(Error::Unsupported(_)));
        let p2pkh_21 =
            [&[OP_DUP, OP_HASH160, 21][..], &[0x11; 21][..], &[OP_EQUALVERIFY, OP_CHECKSIG][..]]
                .concat();
        assert_matches!(ScriptType::classify(&p2pkh_21), Err(Error::Unsupported(_)));
        let p2sh_32 = [&[OP_HASH160, 32][..], &[0x11; 32][..], &[OP_EQUAL][..]].concat();
        assert_matches!(ScriptType::classify(&p2sh_32), Err(Error::Unsupported(_)));
    }

    #[test]
    fn classify_checks_push_size() {
        let script = hex!("76a9159260e1a82c0f394549eb2f4a79f9d15ce586d4ab88ac");
        assert_eq!(
            ScriptType::classify(&script),
            Err(Error::WrongPushSize {
                script_type: ScriptType::P2pkh,
                expected: 20,
                actual: 21
            })
        );
        let script = hex!("a9139260e1a82c0f394549eb2f4a79f9d15ce586d4ab87");
        assert_matches!(
            ScriptType::classify(&script),
            Err(Error::WrongPushSize { script_type: ScriptType::P2sh, expected: 20, actual: 19 })
        );
        let script = hex!("00159260e1a82c0f394549eb2f4a79f9d15ce586d4ab");
        assert_matches!(
            ScriptType::classify(&script),
            Err(Error::WrongPushSize { script_type: ScriptType::P2wpkh, .. })
        );
    }

    #[test]
    fn witness_program_must_match_key() {
        let key_hash = PubkeyHash::from_byte_array(PKH);
        let script = ScriptBuf::new_v0_p2wpkh(&PKH);
        assert_eq!(ScriptType::classify_for_key(script.as_bytes(), &key_hash), Ok(ScriptType::P2wpkh));

        let other = ScriptBuf::new_v0_p2wpkh(&[0x42; 20]);
        assert_matches!(
            ScriptType::classify_for_key(other.as_bytes(), &key_hash),
            Err(Error::KeyHashMismatch { .. })
        );

        // P2PKH isn't tied to the key
        let p2pkh = ScriptBuf::new_p2pkh(&[0x42; 20]);
        assert_eq!(ScriptType::classify_for_key(p2pkh.as_bytes(), &key_hash), Ok(ScriptType::P2pkh));
    }

    #[test]
    fn script_hash_must_wrap_key() {
        let key_hash = PubkeyHash::from_byte_array(PKH);
        let nested = hex!("a914f7d08e8844d09b983df0f2a641798f0318b5dd0887");
        assert_eq!(ScriptType::classify_for_key(&nested, &key_hash), Ok(ScriptType::P2sh));

        let other = ScriptBuf::new_p2sh(&[0x42; 20]);
        assert_eq!(
            ScriptType::classify_for_key(other.as_bytes(), &key_hash),
            Err(Error::RedeemScriptMismatch {
                script_hash: "42".repeat(20),
                expected: ScriptHash::from_byte_array(hex!(
                    "f7d08e8844d09b983df0f2a641798f0318b5dd08"
                )),
            })
        );
    }

    #[test]
    fn builder_push_sizes() {
        let script = Builder::new().push_slice(&[0xab; 76]).into_script();
        assert_eq!(&script.as_bytes()[..2], &[OP_PUSHDATA1, 76]);
        assert_eq!(script.len(), 78);
        let script = Builder::new().push_slice(&[0xab; 3]).into_script();
        assert_eq!(script.as_bytes(), &[3, 0xab, 0xab, 0xab]);
    }
}
