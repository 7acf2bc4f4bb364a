// SPDX-License-Identifier: CC0-1.0

//! Transaction inputs.

use std::io;

use crate::blockdata::script::ScriptBuf;
use crate::blockdata::transaction::Sequence;
use crate::blockdata::transaction::outpoint::OutPoint;
use crate::blockdata::transaction::witness::Witness;
use crate::consensus::{Encodable, VarInt};

/// A transaction input, which defines old coins to be consumed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TxIn {
    /// The reference to the previous output that is being used as an input.
    pub previous_output: OutPoint,
    /// The script which pushes values on the stack which will cause
    /// the referenced output's script to be accepted.
    pub script_sig: ScriptBuf,
    /// The sequence number.
    pub sequence: Sequence,
    /// Witness data: an array of byte-arrays.
    ///
    /// Only serialized when the transaction carries the segwit marker. Note that this field is
    /// *not* (de)serialized with the rest of the TxIn in Encodable/Decodable, as it is (de)serialized
    /// at the end of the full Transaction.
    pub witness: Witness,
}

impl TxIn {
    /// Size of this input without its witness.
    pub fn base_size(&self) -> usize {
        OutPoint::SIZE
            + VarInt(self.script_sig.len() as u64).len()
            + self.script_sig.len()
            + Sequence::SIZE
    }
}

impl Encodable for TxIn {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = 0;
        len += self.previous_output.consensus_encode(w)?;
        len += self.script_sig.consensus_encode(w)?;
        len += self.sequence.consensus_encode(w)?;
        Ok(len)
    }
}
