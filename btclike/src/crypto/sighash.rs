// SPDX-License-Identifier: CC0-1.0

//! Signature hash implementation (used in transaction signing).
//!
//! Efficient implementation of the algorithm to compute the message to be signed.
//! Computing signature hashes is required to sign a transaction and this module is designed to
//! handle its complexity efficiently. Computing these hashes is as simple as creating
//! [`SighashCache`] and calling its methods.
//!
//! Three preimage dialects are supported:
//!
//! * legacy, for non-witness inputs of chains without replay protection,
//! * BIP143, for witness inputs of the same chains,
//! * fork id, the BIP143 shape with the `0x40` flag set, for chains that split off with replay
//!   protection and never adopted segwit.
//!
//! Every preimage uses the outpoint bytes as stored in [`OutPoint`](crate::OutPoint), which is
//! the byte order the chain also serializes them in.

use core::borrow::Borrow;
use core::fmt;
use std::io;

use btclike_network::SighashDialect;
use hashes::{Hash, hash_newtype, sha256d};

use crate::blockdata::script::{ScriptBuf, ScriptType};
use crate::blockdata::transaction::Transaction;
use crate::consensus::{Encodable, VarInt};
use crate::hash_types::PubkeyHash;

hash_newtype! {
    /// Hash of a transaction according to one of the signature algorithms.
    pub struct Sighash(sha256d::Hash);
}

/// Signature hash flag.
///
/// Only signing over all inputs and outputs is supported, in its plain and fork id form.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub enum SighashType {
    /// 0x1: Sign all outputs.
    All = 0x01,
    /// 0x41: Sign all outputs, with the replay protecting fork id bit.
    AllForkId = 0x41,
}

impl SighashType {
    /// The flag a chain of the given dialect signs with.
    pub fn for_dialect(dialect: SighashDialect) -> SighashType {
        match dialect {
            SighashDialect::Legacy => SighashType::All,
            SighashDialect::Fork => SighashType::AllForkId,
        }
    }

    /// Converts [`SighashType`] to a `u32` sighash flag, as committed to in preimages.
    pub fn to_u32(self) -> u32 {
        self as u32
    }

    /// The byte appended to DER signatures.
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SighashType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SighashType::All => "SIGHASH_ALL",
            SighashType::AllForkId => "SIGHASH_ALL|SIGHASH_FORKID",
        };
        f.write_str(s)
    }
}

/// Possible errors in computing the signature message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Could happen only by using `*_encode_signing_*` methods with custom writers, engines
    /// like those used in `*_signature_hash` methods do not error.
    #[error("writer errored: {0:?}")]
    Io(io::ErrorKind),

    /// Requested index is greater or equal than the number of inputs in the transaction.
    #[error("requested index ({index}) is greater or equal than the number of transaction inputs ({inputs_size})")]
    IndexOutOfInputsBounds {
        /// Requested index.
        index: usize,
        /// Number of transaction inputs.
        inputs_size: usize,
    },

    /// The fork id dialect has no witness preimage.
    #[error("input {index} spends a {script_type} output, which the fork id dialect cannot sign")]
    WitnessInputInForkDialect {
        /// Index of the offending input.
        index: usize,
        /// Type of the output it spends.
        script_type: ScriptType,
    },
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.kind())
    }
}

/// What the signer knows about the output an input spends.
#[derive(Debug, Clone, Copy)]
pub struct SpentOutput<'a> {
    /// The output's locking script.
    pub script_pubkey: &'a ScriptBuf,
    /// Shape of `script_pubkey`.
    pub script_type: ScriptType,
    /// The output's value.
    pub value: u64,
    /// Hash of the key that signs for it.
    pub key_hash: &'a PubkeyHash,
}

/// Efficiently calculates signature hash message for legacy, segwit and fork id inputs.
///
/// The hashes over all outpoints, sequences and outputs are shared by every BIP143-shaped
/// preimage of a transaction and are computed once.
#[derive(Debug)]
pub struct SighashCache<T: Borrow<Transaction>> {
    /// Access to transaction required for transaction introspection.
    tx: T,

    /// Common cache for BIP143 and fork id sighashes.
    common_cache: Option<CommonCache>,
}

#[derive(Debug, Clone, Copy)]
struct CommonCache {
    prevouts: sha256d::Hash,
    sequences: sha256d::Hash,
    outputs: sha256d::Hash,
}

impl<R: Borrow<Transaction>> SighashCache<R> {
    /// Constructs a new `SighashCache` from an unsigned transaction.
    ///
    /// The sighash components are computed in a lazy manner when required. For the generated
    /// sighashes to be valid, no fields in the transaction may change except for script_sig and
    /// witness.
    pub fn new(tx: R) -> Self {
        SighashCache {
            tx,
            common_cache: None,
        }
    }

    /// Returns the reference to the cached transaction.
    pub fn transaction(&self) -> &Transaction {
        self.tx.borrow()
    }

    /// Destroys the cache and recovers the stored transaction.
    pub fn into_transaction(self) -> R {
        self.tx
    }

    fn check_index(&self, input_index: usize) -> Result<(), Error> {
        let inputs_size = self.tx.borrow().input.len();
        if input_index >= inputs_size {
            return Err(Error::IndexOutOfInputsBounds {
                index: input_index,
                inputs_size,
            });
        }
        Ok(())
    }

    /// Computes the signature hash of an input the way `dialect` prescribes for the output it
    /// spends.
    pub fn signature_hash(
        &mut self,
        input_index: usize,
        spent: &SpentOutput<'_>,
        dialect: SighashDialect,
    ) -> Result<Sighash, Error> {
        tracing::trace!(input_index, script_type = %spent.script_type, ?dialect, "computing sighash");
        match (dialect, spent.script_type.is_witness()) {
            (SighashDialect::Legacy, false) => {
                self.legacy_signature_hash(input_index, spent.script_pubkey, SighashType::All)
            }
            (SighashDialect::Legacy, true) => {
                let script_code = ScriptBuf::new_p2pkh(spent.key_hash.as_byte_array());
                self.segwit_v0_signature_hash(input_index, &script_code, spent.value, SighashType::All)
            }
            (SighashDialect::Fork, false) => {
                let script_code = ScriptBuf::new_p2pkh(spent.key_hash.as_byte_array());
                self.fork_id_signature_hash(input_index, &script_code, spent.value)
            }
            (SighashDialect::Fork, true) => Err(Error::WitnessInputInForkDialect {
                index: input_index,
                script_type: spent.script_type,
            }),
        }
    }

    /// Encodes the legacy signing data from which a signature hash for a given input index with a
    /// given sighash flag can be computed.
    ///
    /// Every input other than `input_index` is serialized with an empty script, the signed input
    /// with `script_pubkey`.
    pub fn legacy_encode_signing_data_to<W: io::Write + ?Sized>(
        &self,
        writer: &mut W,
        input_index: usize,
        script_pubkey: &ScriptBuf,
        sighash_type: SighashType,
    ) -> Result<(), Error> {
        self.check_index(input_index)?;
        let tx = self.tx.borrow();

        tx.version.consensus_encode(writer)?;
        VarInt(tx.input.len() as u64).consensus_encode(writer)?;
        for (n, input) in tx.input.iter().enumerate() {
            input.previous_output.consensus_encode(writer)?;
            if n == input_index {
                script_pubkey.consensus_encode(writer)?;
            } else {
                ScriptBuf::new().consensus_encode(writer)?;
            }
            input.sequence.consensus_encode(writer)?;
        }
        tx.output.consensus_encode(writer)?;
        tx.lock_time.consensus_encode(writer)?;
        sighash_type.to_u32().consensus_encode(writer)?;
        Ok(())
    }

    /// Computes a legacy signature hash for a given input index with a given sighash flag.
    pub fn legacy_signature_hash(
        &self,
        input_index: usize,
        script_pubkey: &ScriptBuf,
        sighash_type: SighashType,
    ) -> Result<Sighash, Error> {
        let mut enc = Vec::new();
        self.legacy_encode_signing_data_to(&mut enc, input_index, script_pubkey, sighash_type)?;
        Ok(Sighash::hash(&enc))
    }

    /// Encodes the BIP143 signing data for any flag type into a given object implementing a
    /// [`std::io::Write`] trait.
    pub fn segwit_v0_encode_signing_data_to<W: io::Write + ?Sized>(
        &mut self,
        writer: &mut W,
        input_index: usize,
        script_code: &ScriptBuf,
        value: u64,
        sighash_type: SighashType,
    ) -> Result<(), Error> {
        self.check_index(input_index)?;
        let common = self.common_cache();
        let tx = self.tx.borrow();
        let input = &tx.input[input_index];

        tx.version.consensus_encode(writer)?;
        common.prevouts.as_byte_array().consensus_encode(writer)?;
        common.sequences.as_byte_array().consensus_encode(writer)?;
        input.previous_output.consensus_encode(writer)?;
        script_code.consensus_encode(writer)?;
        value.consensus_encode(writer)?;
        input.sequence.consensus_encode(writer)?;
        common.outputs.as_byte_array().consensus_encode(writer)?;
        tx.lock_time.consensus_encode(writer)?;
        sighash_type.to_u32().consensus_encode(writer)?;
        Ok(())
    }

    /// Computes the BIP143 sighash for any flag type.
    pub fn segwit_v0_signature_hash(
        &mut self,
        input_index: usize,
        script_code: &ScriptBuf,
        value: u64,
        sighash_type: SighashType,
    ) -> Result<Sighash, Error> {
        let mut enc = Vec::new();
        self.segwit_v0_encode_signing_data_to(&mut enc, input_index, script_code, value, sighash_type)?;
        Ok(Sighash::hash(&enc))
    }

    /// Computes the fork id sighash: the BIP143 preimage signed with [`SighashType::AllForkId`].
    pub fn fork_id_signature_hash(
        &mut self,
        input_index: usize,
        script_code: &ScriptBuf,
        value: u64,
    ) -> Result<Sighash, Error> {
        self.segwit_v0_signature_hash(input_index, script_code, value, SighashType::AllForkId)
    }

    fn common_cache(&mut self) -> CommonCache {
        let tx = self.tx.borrow();
        *self.common_cache.get_or_insert_with(|| {
            let mut prevouts = Vec::with_capacity(tx.input.len() * 36);
            let mut sequences = Vec::with_capacity(tx.input.len() * 4);
            for input in &tx.input {
                input.previous_output.consensus_encode(&mut prevouts).expect("in-memory writers don't error");
                input.sequence.consensus_encode(&mut sequences).expect("in-memory writers don't error");
            }
            let mut outputs = Vec::new();
            for output in &tx.output {
                output.consensus_encode(&mut outputs).expect("in-memory writers don't error");
            }
            CommonCache {
                prevouts: sha256d::Hash::hash(&prevouts),
                sequences: sha256d::Hash::hash(&sequences),
                outputs: sha256d::Hash::hash(&outputs),
            }
        })
    }
}
