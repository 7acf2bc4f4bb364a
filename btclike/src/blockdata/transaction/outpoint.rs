// SPDX-License-Identifier: CC0-1.0

//! Transaction outpoints.

use core::fmt;
use std::io;

use btclike_network::OutpointOrder;
use hashes::Hash;

use crate::consensus::Encodable;
use crate::hash_types::Txid;

/// A reference to a transaction output.
///
/// `txid` holds the referenced id exactly as it is written into transactions and signature
/// preimages of the chain the outpoint belongs to. Chains disagree on that byte order, see
/// [`OutPoint::from_display_bytes`].
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct OutPoint {
    /// The referenced transaction's txid, in wire order.
    pub txid: Txid,
    /// The index of the referenced output in its transaction's vout.
    pub vout: u32,
}

impl OutPoint {
    /// The number of bytes that an outpoint contributes to the size of a transaction.
    pub const SIZE: usize = 32 + 4;

    /// Creates a new [`OutPoint`].
    #[inline]
    pub fn new(txid: Txid, vout: u32) -> OutPoint {
        OutPoint {
            txid,
            vout,
        }
    }

    /// Creates an outpoint from the txid bytes in the order block explorers print them.
    ///
    /// Chains with [`OutpointOrder::Reversed`] put those bytes on the wire back to front,
    /// [`OutpointOrder::Natural`] chains keep them as they are.
    pub fn from_display_bytes(display: [u8; 32], vout: u32, order: OutpointOrder) -> OutPoint {
        let mut wire = display;
        if order == OutpointOrder::Reversed {
            wire.reverse();
        }
        OutPoint::new(Txid::from_byte_array(wire), vout)
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid.as_byte_array()), self.vout)
    }
}

impl Encodable for OutPoint {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let len = self.txid.as_byte_array().consensus_encode(w)?;
        Ok(len + self.vout.consensus_encode(w)?)
    }
}
