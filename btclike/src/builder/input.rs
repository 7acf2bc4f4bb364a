// SPDX-License-Identifier: CC0-1.0

//! Spendable coins.

use crate::blockdata::script::{ScriptBuf, ScriptType};
use crate::builder::BuilderError;
use crate::crypto::key::PrivateKey;

/// A coin the builder may spend, together with the key authorized to spend it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnspentOutput {
    /// Id of the transaction that created the coin, in display order.
    pub txid: [u8; 32],
    /// Index of the coin in that transaction's outputs.
    pub vout: u32,
    /// The coin's locking script.
    pub script_pubkey: ScriptBuf,
    /// Shape of `script_pubkey`.
    pub script_type: ScriptType,
    /// Value in the chain's smallest unit.
    pub value: u64,
    /// Key that signs the spend.
    pub key: PrivateKey,
}

impl UnspentOutput {
    /// Validates and wraps a coin.
    ///
    /// `txid_hex` is the 64 character id as block explorers print it. The locking script must
    /// be P2PKH, the P2SH of `key`'s nested P2WPKH redeem script or a P2WPKH program of `key`, and
    /// the value must be positive.
    pub fn new(
        txid_hex: &str,
        vout: u32,
        script_pubkey: &[u8],
        value: u64,
        key: PrivateKey,
    ) -> Result<UnspentOutput, BuilderError> {
        let txid: [u8; 32] = hex::decode(txid_hex)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or_else(|| BuilderError::InvalidTxid(txid_hex.to_owned()))?;
        let script_type = ScriptType::classify_for_key(script_pubkey, &key.pubkey_hash())?;
        if value == 0 {
            return Err(BuilderError::NonPositiveAmount {
                field: "input",
            });
        }
        if script_type.is_witness() && !key.compressed {
            return Err(BuilderError::UncompressedWitnessKey {
                script_type,
            });
        }
        Ok(UnspentOutput {
            txid,
            vout,
            script_pubkey: ScriptBuf::from_bytes(script_pubkey.to_vec()),
            script_type,
            value,
            key,
        })
    }
}
