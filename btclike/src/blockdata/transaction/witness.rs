// SPDX-License-Identifier: CC0-1.0

//! Witness
//!
//! This module contains the [`Witness`] struct and related methods to operate on it

use std::io;

use crate::consensus::{Encodable, VarInt};

/// The witness stack of one input.
///
/// An empty witness still serializes as a zero item count, which is what non-witness inputs of a
/// segwit-flagged transaction carry.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Witness {
    content: Vec<Vec<u8>>,
}

impl Witness {
    /// Creates a new empty [`Witness`].
    pub const fn new() -> Self {
        Witness {
            content: Vec::new(),
        }
    }

    /// Creates a witness from a list of stack items.
    pub fn from_slice<T: AsRef<[u8]>>(slice: &[T]) -> Self {
        Witness {
            content: slice.iter().map(|item| item.as_ref().to_vec()).collect(),
        }
    }

    /// Returns `true` if the witness contains no element.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of elements this witness holds.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns a struct implementing [`Iterator`].
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.content.iter().map(Vec::as_slice)
    }

    /// Push a new element on the witness, requires an allocation.
    pub fn push<T: AsRef<[u8]>>(&mut self, new_element: T) {
        self.content.push(new_element.as_ref().to_vec());
    }

    /// Returns the last element in the witness, if any.
    pub fn last(&self) -> Option<&[u8]> {
        self.content.last().map(Vec::as_slice)
    }

    /// Serialized size of the stack including the item count.
    pub fn size(&self) -> usize {
        VarInt(self.content.len() as u64).len()
            + self
                .content
                .iter()
                .map(|item| VarInt(item.len() as u64).len() + item.len())
                .sum::<usize>()
    }
}

impl Encodable for Witness {
    fn consensus_encode<W: io::Write + ?Sized>(&self, w: &mut W) -> Result<usize, io::Error> {
        let mut len = VarInt(self.content.len() as u64).consensus_encode(w)?;
        for item in &self.content {
            len += item.consensus_encode(w)?;
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::serialize;

    #[test]
    fn empty_witness_is_single_zero() {
        let witness = Witness::new();
        assert!(witness.is_empty());
        assert_eq!(serialize(&witness), vec![0u8]);
        assert_eq!(witness.size(), 1);
    }

    #[test]
    fn two_item_stack() {
        let mut witness = Witness::new();
        witness.push([0xaau8; 3]);
        witness.push(vec![0xbbu8; 2]);
        assert_eq!(witness.len(), 2);
        assert_eq!(witness.last(), Some(&[0xbb, 0xbb][..]));
        assert_eq!(serialize(&witness), vec![2, 3, 0xaa, 0xaa, 0xaa, 2, 0xbb, 0xbb]);
        assert_eq!(witness.size(), 8);
        assert_eq!(Witness::from_slice(&[vec![0xaau8; 3], vec![0xbbu8; 2]]), witness);
    }
}
