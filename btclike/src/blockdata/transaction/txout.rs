// SPDX-License-Identifier: CC0-1.0

//! Transaction outputs.

use std::io;

use crate::blockdata::script::ScriptBuf;
use crate::consensus::{Encodable, VarInt};

/// A transaction output, which defines new coins to be created from old ones.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TxOut {
    /// The value of the output, in the chain's smallest unit.
    pub value: u64,
    /// The script which must be satisfied for the output to be spent.
    pub script_pubkey: ScriptBuf,
}

impl TxOut {
    /// Serialized size of this output.
    pub fn size(&self) -> usize {
        8 + VarInt(self.script_pubkey.len() as u64).len() + self.script_pubkey.len()
    }
}

impl Encodable for TxOut {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = self.value.consensus_encode(w)?;
        len += self.script_pubkey.consensus_encode(w)?;
        Ok(len)
    }
}
