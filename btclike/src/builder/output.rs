// SPDX-License-Identifier: CC0-1.0

//! Payment destinations.

use btclike_network::Network;

use crate::address::Address;
use crate::blockdata::script::ScriptBuf;
use crate::blockdata::transaction::txout::TxOut;
use crate::builder::BuilderError;

/// A payment of `value` to a destination resolved at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentOutput {
    /// The resolved destination.
    pub address: Address,
    /// Value in the chain's smallest unit.
    pub value: u64,
}

impl PaymentOutput {
    /// Parses `address` as a destination on `network` and checks the value is positive.
    pub fn new(address: &str, value: u64, network: Network) -> Result<PaymentOutput, BuilderError> {
        let address = Address::from_str_with_network(address, network)?;
        PaymentOutput::to_address(address, value)
    }

    /// Pays an already resolved address.
    pub fn to_address(address: Address, value: u64) -> Result<PaymentOutput, BuilderError> {
        if value == 0 {
            return Err(BuilderError::NonPositiveAmount {
                field: "output",
            });
        }
        Ok(PaymentOutput {
            address,
            value,
        })
    }

    /// The locking script of the destination.
    pub fn script_pubkey(&self) -> ScriptBuf {
        self.address.script_pubkey()
    }

    pub(crate) fn to_txout(&self) -> TxOut {
        TxOut {
            value: self.value,
            script_pubkey: self.script_pubkey(),
        }
    }
}
