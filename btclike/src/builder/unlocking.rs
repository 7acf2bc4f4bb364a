// SPDX-License-Identifier: CC0-1.0

//! Unlocking data producers.
//!
//! Given a signature with its sighash flag already appended, these functions build what goes
//! into an input's script sig and witness for each [`ScriptType`].

use hashes::Hash;

use crate::blockdata::script::{Builder, ScriptBuf, ScriptType};
use crate::blockdata::transaction::witness::Witness;
use crate::crypto::key::PrivateKey;

/// Builds the script sig of an input spending `script_type`.
///
/// * P2PKH: `<signature> <public key>`, the key serialized as `key.compressed` says.
/// * P2SH: a single push of the P2WPKH redeem script `0 <key hash>`.
/// * P2WPKH: empty.
pub fn script_sig(signature: &[u8], key: &PrivateKey, script_type: ScriptType) -> ScriptBuf {
    match script_type {
        ScriptType::P2pkh => {
            Builder::new().push_slice(signature).push_slice(&key.public_key_bytes()).into_script()
        }
        ScriptType::P2sh => {
            let redeem_script = ScriptBuf::new_v0_p2wpkh(key.pubkey_hash().as_byte_array());
            Builder::new().push_slice(redeem_script.as_bytes()).into_script()
        }
        ScriptType::P2wpkh => ScriptBuf::new(),
    }
}

/// Builds the two item witness `<signature> <public key>` of a witness input.
pub fn witness(signature: &[u8], key: &PrivateKey) -> Witness {
    let mut witness = Witness::new();
    witness.push(signature);
    witness.push(key.public_key_bytes());
    witness
}

#[cfg(test)]
mod tests {
    use hex_lit::hex;

    use super::*;

    fn key() -> PrivateKey {
        // m/12 of the c4eb38a2 test seed
        PrivateKey::from_wif("L3T6BEeYJRegkMqkzTTe2XbjFu91kNFMV7TLtTSFQrDYCfx6W9Fz").unwrap()
    }

    #[test]
    fn nested_script_sig_pushes_redeem_script() {
        let script = script_sig(&[0x30, 0x01], &key(), ScriptType::P2sh);
        assert_eq!(script.as_bytes(), hex!("1600147305fb6d23d9f629410f36572ed870b860926565"));
    }

    #[test]
    fn p2pkh_script_sig_layout() {
        let signature = [0x30u8; 71];
        let script = script_sig(&signature, &key(), ScriptType::P2pkh);
        let bytes = script.as_bytes();
        assert_eq!(bytes[0], 71);
        assert_eq!(&bytes[1..72], &signature[..]);
        assert_eq!(bytes[72], 33);
        assert_eq!(&bytes[73..], &key().public_key().serialize()[..]);
    }

    #[test]
    fn native_segwit_has_empty_script_sig() {
        assert!(script_sig(&[0x30], &key(), ScriptType::P2wpkh).is_empty());
        let witness = witness(&[0x30, 0x01], &key());
        assert_eq!(witness.len(), 2);
        assert_eq!(witness.last(), Some(&key().public_key().serialize()[..]));
    }
}
