// Rust Bitcoin-like Library
// Originally written in 2014 by
//     Andrew Poelstra <apoelstra@wpsoftware.net>
//     For Bitcoin
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! Bitcoin-like transactions.
//!
//! A transaction describes a transfer of money. It consumes previously-unspent
//! transaction outputs and produces new ones, satisfying the condition to spend
//! the old outputs (typically a digital signature with a specific key must be
//! provided) and defining the condition to spend the new ones.
//!
//! This module provides the structures and the consensus serialization shared by every
//! supported chain, including the segwit marker/flag layout.

pub mod outpoint;
pub mod txin;
pub mod txout;
pub mod witness;

use core::fmt;
use std::io;

use hashes::Hash;

use crate::blockdata::transaction::txin::TxIn;
use crate::blockdata::transaction::txout::TxOut;
use crate::consensus::encode::{self, Encodable, VarInt};
use crate::hash_types::Txid;

/// Bitcoin transaction input sequence number.
///
/// Inputs built by [`crate::builder::TransactionBuilder`] default to [`Sequence::ZERO`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(crate = "actual_serde"))]
pub struct Sequence(pub u32);

impl Sequence {
    /// Zero value sequence.
    pub const ZERO: Self = Sequence(0);
    /// The maximum allowable sequence number, which disables relative lock time and RBF.
    pub const MAX: Self = Sequence(0xFFFFFFFF);
    /// The number of bytes that a sequence number contributes to the size of a transaction.
    pub const SIZE: usize = 4;

    /// Returns the inner 32bit integer value of Sequence.
    #[inline]
    pub fn to_consensus_u32(self) -> u32 {
        self.0
    }
}

impl From<u32> for Sequence {
    fn from(value: u32) -> Self {
        Sequence(value)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Encodable for Sequence {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        self.0.consensus_encode(w)
    }
}

/// A Bitcoin-like transaction, which describes an authenticated movement of coins.
///
/// If any input is spent with a non-empty witness the transaction serializes with the segwit
/// marker and flag, and every input then contributes a witness stack, possibly empty.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Transaction {
    /// The protocol version, is currently expected to be 1.
    pub version: i32,
    /// Block height or timestamp. Transaction cannot be included in a block until this height/time.
    pub lock_time: u32,
    /// List of transaction inputs.
    pub input: Vec<TxIn>,
    /// List of transaction outputs.
    pub output: Vec<TxOut>,
}

impl Transaction {
    /// Segwit marker byte written after the version.
    pub const SEGWIT_MARKER: u8 = 0x00;
    /// Segwit flag byte written after the marker.
    pub const SEGWIT_FLAG: u8 = 0x01;

    /// Whether any input carries witness data.
    pub fn has_witness(&self) -> bool {
        self.input.iter().any(|input| !input.witness.is_empty())
    }

    /// Computes the txid.
    ///
    /// The txid commits to the serialization without marker, flag and witnesses, so it does not
    /// change when witness data does.
    pub fn txid(&self) -> Txid {
        let mut buf = Vec::with_capacity(self.stripped_size());
        self.encode_stripped(&mut buf).expect("in-memory writers don't error");
        Txid::hash(&buf)
    }

    /// Gets the serialized size of the transaction, witness data included.
    pub fn size(&self) -> usize {
        let mut size = self.stripped_size();
        if self.has_witness() {
            size += 2;
            size += self.input.iter().map(|input| input.witness.size()).sum::<usize>();
        }
        size
    }

    /// Gets the size of the transaction as serialized without witness data.
    pub fn stripped_size(&self) -> usize {
        4 + VarInt(self.input.len() as u64).len()
            + self.input.iter().map(TxIn::base_size).sum::<usize>()
            + VarInt(self.output.len() as u64).len()
            + self.output.iter().map(TxOut::size).sum::<usize>()
            + 4
    }

    /// Virtual size as used for fee rates, rounded up.
    pub fn vsize(&self) -> usize {
        (self.stripped_size() * 3 + self.size()).div_ceil(4)
    }

    /// Serializes the transaction, hex encoded.
    pub fn serialize_hex(&self) -> String {
        encode::serialize_hex(self)
    }

    fn encode_stripped<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += self.input.consensus_encode(w)?;
        len += self.output.consensus_encode(w)?;
        len += self.lock_time.consensus_encode(w)?;
        Ok(len)
    }
}

impl Encodable for Transaction {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        if !self.has_witness() {
            return self.encode_stripped(w);
        }

        let mut len = 0;
        len += self.version.consensus_encode(w)?;
        len += Transaction::SEGWIT_MARKER.consensus_encode(w)?;
        len += Transaction::SEGWIT_FLAG.consensus_encode(w)?;
        len += self.input.consensus_encode(w)?;
        len += self.output.consensus_encode(w)?;
        for input in &self.input {
            len += input.witness.consensus_encode(w)?;
        }
        len += self.lock_time.consensus_encode(w)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use btclike_network::OutpointOrder;
    use hex_lit::hex;

    use super::*;
    use crate::blockdata::script::ScriptBuf;
    use crate::blockdata::transaction::outpoint::OutPoint;
    use crate::blockdata::transaction::witness::Witness;
    use crate::consensus::serialize;

    fn unsigned_tx() -> Transaction {
        let previous_output = OutPoint::from_display_bytes(
            hex!("8b328a4768f6f168799a8509e4541d7bc64e632509143c5e27328029680b6786"),
            0,
            OutpointOrder::Reversed,
        );
        Transaction {
            version: 1,
            lock_time: 0,
            input: vec![TxIn {
                previous_output,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: vec![TxOut {
                value: 90000,
                script_pubkey: ScriptBuf::new_v0_p2wpkh(&hex!(
                    "9260e1a82c0f394549eb2f4a79f9d15ce586d4ab"
                )),
            }],
        }
    }

    #[test]
    fn test_stripped_serialization() {
        let tx = unsigned_tx();
        assert!(!tx.has_witness());
        let ser = serialize(&tx);
        assert_eq!(
            ser,
            hex!(
                "010000000186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b0000000000ffffffff01905f0100000000001600149260e1a82c0f394549eb2f4a79f9d15ce586d4ab00000000"
            )
        );
        assert_eq!(ser.len(), tx.size());
        assert_eq!(tx.size(), tx.stripped_size());
        assert_eq!(tx.vsize(), tx.size());
    }

    #[test]
    fn test_witness_serialization() {
        let mut tx = unsigned_tx();
        let stripped_txid = tx.txid();
        tx.input[0].witness = Witness::from_slice(&[vec![0x30u8; 3], vec![0x02u8; 2]]);
        assert!(tx.has_witness());

        let ser = serialize(&tx);
        assert_eq!(&ser[4..6], &[0x00, 0x01]);
        assert_eq!(&ser[ser.len() - 12..], &hex!("020330303002020200000000"));
        assert_eq!(ser.len(), tx.size());
        assert_eq!(tx.size(), tx.stripped_size() + 2 + 8);
        // witness data doesn't move the txid
        assert_eq!(tx.txid(), stripped_txid);
        assert!(tx.vsize() < tx.size());
    }

    #[test]
    fn test_sequence() {
        assert_eq!(Sequence::default(), Sequence::ZERO);
        assert_eq!(Sequence::MAX.to_consensus_u32(), u32::MAX);
        assert_eq!(serialize(&Sequence::MAX), vec![0xff; 4]);
        assert_eq!(Sequence::from(7).to_string(), "7");
    }
}
