// SPDX-License-Identifier: CC0-1.0

//! Transaction building.
//!
//! [`TransactionBuilder`] accumulates coins to spend and payments to make, then in
//! [`TransactionBuilder::build`] works out the change, signs every input with the preimage
//! dialect of its chain and serializes the result. Inputs and outputs are validated when they
//! are added; funds and change are checked when building.

pub mod input;
pub mod output;
pub mod unlocking;

use btclike_network::{Network, NetworkParameters, SighashDialect};
use hashes::Hash;

pub use self::input::UnspentOutput;
pub use self::output::PaymentOutput;
use crate::address::{self, Address};
use crate::blockdata::script::{self, ScriptBuf, ScriptType};
use crate::blockdata::transaction::outpoint::OutPoint;
use crate::blockdata::transaction::txin::TxIn;
use crate::blockdata::transaction::witness::Witness;
use crate::blockdata::transaction::{Sequence, Transaction};
use crate::consensus::serialize;
use crate::crypto::sighash::{self, SighashCache, SighashType, SpentOutput};
use crate::hash_types::Txid;

/// Errors raised while assembling a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// No inputs provided.
    #[error("transaction must contain at least one input")]
    NoInputs,
    /// No outputs provided and nothing left over for change.
    #[error("transaction must contain at least one output")]
    NoOutputs,
    /// Inputs don't cover outputs plus fee.
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds {
        /// Sum of input values.
        available: u64,
        /// Sum of output values plus the fee.
        required: u64,
    },
    /// There is change but nowhere to send it.
    #[error("transaction contains change ({change}) but no address to send it to")]
    NoChangeAddress {
        /// The unassigned amount.
        change: u64,
    },
    /// Input values, or output values plus the fee, add up to more than a `u64` holds.
    #[error("sum of {field} values overflows")]
    ValueOverflow {
        /// `"input"` or `"output"`.
        field: &'static str,
    },
    /// A negative fee was requested.
    #[error("fee must not be negative, got {0}")]
    NegativeFee(i64),
    /// The transaction id isn't 64 hex characters.
    #[error("transaction id must be 32 bytes of hex, got {0:?}")]
    InvalidTxid(String),
    /// A zero input or output value.
    #[error("{field} amount must be positive")]
    NonPositiveAmount {
        /// `"input"` or `"output"`.
        field: &'static str,
    },
    /// The locking script of a coin is unsupported or malformed.
    #[error(transparent)]
    Script(#[from] script::Error),
    /// A destination failed to parse.
    #[error(transparent)]
    Address(#[from] address::Error),
    /// A signature hash could not be computed.
    #[error(transparent)]
    Sighash(#[from] sighash::Error),
    /// A destination of another chain.
    #[error("output for {actual} in a {expected} transaction")]
    NetworkMismatch {
        /// The builder's chain.
        expected: Network,
        /// The destination's chain.
        actual: Network,
    },
    /// Fork dialect chains have no witness spends.
    #[error("{network} cannot spend {script_type} outputs")]
    WitnessInputInForkDialect {
        /// The builder's chain.
        network: Network,
        /// Type of the offending coin.
        script_type: ScriptType,
    },
    /// A witness coin on a chain that never adopted segwit.
    #[error("{network} has no segwit, cannot spend {script_type} outputs")]
    SegwitUnsupported {
        /// The builder's chain.
        network: Network,
        /// Type of the offending coin.
        script_type: ScriptType,
    },
    /// Witness spends commit to compressed keys only.
    #[error("{script_type} outputs can't be spent with an uncompressed key")]
    UncompressedWitnessKey {
        /// Type of the offending coin.
        script_type: ScriptType,
    },
}

/// A signed transaction and its accounting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltTransaction {
    /// The signed transaction.
    pub transaction: Transaction,
    /// Its consensus serialization, ready to broadcast.
    pub raw: Vec<u8>,
    /// Its id.
    pub txid: Txid,
    /// Fee paid.
    pub fee: u64,
    /// Value of the change output, zero if there is none.
    pub change: u64,
}

impl BuiltTransaction {
    /// Length of [`BuiltTransaction::raw`].
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Hex of [`BuiltTransaction::raw`].
    pub fn to_hex(&self) -> String {
        hex::encode(&self.raw)
    }
}

#[derive(Clone, Debug)]
struct Input {
    utxo: UnspentOutput,
    sequence: Sequence,
}

/// Builder for transactions spending P2PKH, P2SH-P2WPKH and P2WPKH coins.
///
/// ```rust
/// use btclike::builder::{BuilderError, TransactionBuilder};
/// use btclike::Network;
///
/// let err = TransactionBuilder::new(Network::Dogecoin).build().unwrap_err();
/// assert_eq!(err, BuilderError::NoInputs);
/// ```
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    network: Network,
    inputs: Vec<Input>,
    outputs: Vec<PaymentOutput>,
    change_address: Option<Address>,
    fee: u64,
    version: i32,
    lock_time: u32,
}

impl TransactionBuilder {
    /// Creates an empty builder for `network`: version 1, lock time 0, no fee.
    pub fn new(network: Network) -> Self {
        Self {
            network,
            inputs: Vec::new(),
            outputs: Vec::new(),
            change_address: None,
            fee: 0,
            version: 1,
            lock_time: 0,
        }
    }

    fn params(&self) -> &'static NetworkParameters {
        self.network.params()
    }

    /// Spends a coin with sequence [`Sequence::ZERO`].
    pub fn spend_from(self, utxo: UnspentOutput) -> Result<Self, BuilderError> {
        self.spend_from_with_sequence(utxo, Sequence::ZERO)
    }

    /// Spends a coin with an explicit sequence number.
    pub fn spend_from_with_sequence(
        mut self,
        utxo: UnspentOutput,
        sequence: Sequence,
    ) -> Result<Self, BuilderError> {
        let params = self.params();
        if utxo.script_type.is_witness() {
            if params.sighash_dialect == SighashDialect::Fork {
                return Err(BuilderError::WitnessInputInForkDialect {
                    network: self.network,
                    script_type: utxo.script_type,
                });
            }
            if !params.supports_segwit() {
                return Err(BuilderError::SegwitUnsupported {
                    network: self.network,
                    script_type: utxo.script_type,
                });
            }
        }
        self.inputs.push(Input {
            utxo,
            sequence,
        });
        Ok(self)
    }

    /// Adds a payment.
    pub fn pay_to(mut self, output: PaymentOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Sends whatever inputs leave after outputs and fee to `address`.
    pub fn change_to(mut self, address: &str) -> Result<Self, BuilderError> {
        self.change_address = Some(Address::from_str_with_network(address, self.network)?);
        Ok(self)
    }

    /// Sets the absolute fee.
    pub fn set_fee(mut self, fee: i64) -> Result<Self, BuilderError> {
        self.fee = u64::try_from(fee).map_err(|_| BuilderError::NegativeFee(fee))?;
        Ok(self)
    }

    /// Sets the transaction version.
    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    /// Sets the lock time.
    pub fn lock_time(mut self, lock_time: u32) -> Self {
        self.lock_time = lock_time;
        self
    }

    /// Builds and signs the transaction.
    ///
    /// Everything is recomputed from the accumulated state, so the builder may be reused.
    pub fn build(&self) -> Result<BuiltTransaction, BuilderError> {
        if self.inputs.is_empty() {
            return Err(BuilderError::NoInputs);
        }
        if let Some(output) = self.outputs.iter().find(|o| o.address.network != self.network) {
            return Err(BuilderError::NetworkMismatch {
                expected: self.network,
                actual: output.address.network,
            });
        }

        let available = self
            .inputs
            .iter()
            .try_fold(0u64, |sum, input| sum.checked_add(input.utxo.value))
            .ok_or(BuilderError::ValueOverflow {
                field: "input",
            })?;
        let required = self
            .outputs
            .iter()
            .try_fold(self.fee, |sum, output| sum.checked_add(output.value))
            .ok_or(BuilderError::ValueOverflow {
                field: "output",
            })?;
        let change = available.checked_sub(required).ok_or(BuilderError::InsufficientFunds {
            available,
            required,
        })?;

        let mut tx_outputs = self.outputs.iter().map(PaymentOutput::to_txout).collect::<Vec<_>>();
        if change > 0 {
            let change_address = self.change_address.as_ref().ok_or(BuilderError::NoChangeAddress {
                change,
            })?;
            tx_outputs.push(PaymentOutput::to_address(*change_address, change)?.to_txout());
        }
        if tx_outputs.is_empty() {
            return Err(BuilderError::NoOutputs);
        }

        let params = self.params();
        let order = params.outpoint_order();
        let unsigned = Transaction {
            version: self.version,
            lock_time: self.lock_time,
            input: self
                .inputs
                .iter()
                .map(|input| TxIn {
                    previous_output: OutPoint::from_display_bytes(
                        input.utxo.txid,
                        input.utxo.vout,
                        order,
                    ),
                    script_sig: ScriptBuf::new(),
                    sequence: input.sequence,
                    witness: Witness::new(),
                })
                .collect(),
            output: tx_outputs,
        };

        let segwit = self.inputs.iter().any(|input| input.utxo.script_type.is_witness());
        let sighash_type = SighashType::for_dialect(params.sighash_dialect);
        let mut cache = SighashCache::new(&unsigned);
        let mut unlocking = Vec::with_capacity(self.inputs.len());
        for (index, input) in self.inputs.iter().enumerate() {
            let utxo = &input.utxo;
            let key_hash = utxo.key.pubkey_hash();
            let spent = SpentOutput {
                script_pubkey: &utxo.script_pubkey,
                script_type: utxo.script_type,
                value: utxo.value,
                key_hash: &key_hash,
            };
            let sighash = cache.signature_hash(index, &spent, params.sighash_dialect)?;

            let mut signature = utxo.key.sign_ecdsa(sighash.to_byte_array()).serialize_der().to_vec();
            signature.push(sighash_type.to_byte());

            let script_sig = unlocking::script_sig(&signature, &utxo.key, utxo.script_type);
            let witness = if utxo.script_type.is_witness() {
                unlocking::witness(&signature, &utxo.key)
            } else {
                Witness::new()
            };
            unlocking.push((script_sig, witness));
        }

        let mut transaction = unsigned.clone();
        for (txin, (script_sig, witness)) in transaction.input.iter_mut().zip(unlocking) {
            txin.script_sig = script_sig;
            txin.witness = witness;
        }

        let raw = serialize(&transaction);
        let txid = transaction.txid();
        tracing::debug!(
            network = %self.network,
            inputs = transaction.input.len(),
            outputs = transaction.output.len(),
            fee = self.fee,
            change,
            segwit,
            size = raw.len(),
            %txid,
            "built transaction"
        );
        Ok(BuiltTransaction {
            transaction,
            raw,
            txid,
            fee: self.fee,
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use hex_lit::hex;

    use super::*;
    use crate::crypto::key::PrivateKey;

    const TXID: &str = "8b328a4768f6f168799a8509e4541d7bc64e632509143c5e27328029680b6786";
    const P2PKH_LOCK: [u8; 25] = hex!("76a9143f6d330ab1274be7ee7ec75a387e819874c6f9c688ac");

    fn key(network: Network) -> PrivateKey {
        let key =
            PrivateKey::from_wif("KyDGxaAvG1hbc4DkyDbfyQzu2eUCBNFgoPEByV9M68kGH5QzSL34").unwrap();
        PrivateKey::new(key.inner, network)
    }

    fn utxo(script: &[u8], value: u64, network: Network) -> UnspentOutput {
        UnspentOutput::new(TXID, 0, script, value, key(network)).unwrap()
    }

    fn payment(value: u64) -> PaymentOutput {
        PaymentOutput::new("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", value, Network::Bitcoin).unwrap()
    }

    #[test]
    fn insufficient_funds() {
        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 100_000, Network::Bitcoin))
            .unwrap()
            .pay_to(payment(99_000))
            .set_fee(1_500)
            .unwrap();
        assert_eq!(
            builder.build(),
            Err(BuilderError::InsufficientFunds {
                available: 100_000,
                required: 100_500,
            })
        );
    }

    #[test]
    fn value_sums_overflow() {
        let half = u64::MAX / 2 + 1;
        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, half, Network::Bitcoin))
            .unwrap()
            .spend_from(utxo(&P2PKH_LOCK, half, Network::Bitcoin))
            .unwrap()
            .pay_to(payment(1_000));
        assert_eq!(
            builder.build(),
            Err(BuilderError::ValueOverflow {
                field: "input"
            })
        );

        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 1_000, Network::Bitcoin))
            .unwrap()
            .pay_to(payment(u64::MAX))
            .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
            .unwrap()
            .set_fee(1)
            .unwrap();
        assert_eq!(
            builder.build(),
            Err(BuilderError::ValueOverflow {
                field: "output"
            })
        );

        // exactly u64::MAX is still a plain shortfall
        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 1_000, Network::Bitcoin))
            .unwrap()
            .pay_to(payment(u64::MAX - 1))
            .set_fee(1)
            .unwrap();
        assert_eq!(
            builder.build(),
            Err(BuilderError::InsufficientFunds {
                available: 1_000,
                required: u64::MAX,
            })
        );
    }

    #[test]
    fn change_requires_address() {
        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 100_000, Network::Bitcoin))
            .unwrap()
            .pay_to(payment(90_000))
            .set_fee(1_500)
            .unwrap();
        assert_eq!(
            builder.build(),
            Err(BuilderError::NoChangeAddress {
                change: 8_500
            })
        );

        // exact spends need no change address
        let built = builder.clone().pay_to(payment(8_500)).build().unwrap();
        assert_eq!(built.change, 0);
        assert_eq!(built.transaction.output.len(), 2);
        assert_eq!(built.fee, 1_500);
    }

    #[test]
    fn everything_to_change() {
        let built = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 100_000, Network::Bitcoin))
            .unwrap()
            .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
            .unwrap()
            .set_fee(1_000)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built.change, 99_000);
        assert_eq!(built.transaction.output.len(), 1);

        let no_outputs = TransactionBuilder::new(Network::Bitcoin)
            .spend_from(utxo(&P2PKH_LOCK, 1_000, Network::Bitcoin))
            .unwrap()
            .set_fee(1_000)
            .unwrap();
        assert_eq!(no_outputs.build(), Err(BuilderError::NoOutputs));
    }

    #[test]
    fn negative_fee() {
        assert_matches!(
            TransactionBuilder::new(Network::Bitcoin).set_fee(-1),
            Err(BuilderError::NegativeFee(-1))
        );
    }

    #[test]
    fn rejects_witness_inputs_without_segwit() {
        let p2wpkh = hex!("00149260e1a82c0f394549eb2f4a79f9d15ce586d4ab");
        assert_matches!(
            TransactionBuilder::new(Network::BitcoinCash)
                .spend_from(utxo(&p2wpkh, 1_000, Network::BitcoinCash)),
            Err(BuilderError::WitnessInputInForkDialect {
                network: Network::BitcoinCash,
                script_type: ScriptType::P2wpkh,
            })
        );
        assert_matches!(
            TransactionBuilder::new(Network::Dogecoin)
                .spend_from(utxo(&p2wpkh, 1_000, Network::Dogecoin)),
            Err(BuilderError::SegwitUnsupported { .. })
        );
    }

    #[test]
    fn rejects_foreign_outputs() {
        let builder = TransactionBuilder::new(Network::Litecoin)
            .spend_from(utxo(&P2PKH_LOCK, 100_000, Network::Litecoin))
            .unwrap()
            .pay_to(payment(100_000));
        assert_eq!(
            builder.build(),
            Err(BuilderError::NetworkMismatch {
                expected: Network::Litecoin,
                actual: Network::Bitcoin,
            })
        );
    }

    #[test]
    fn signatures_are_low_s_der_with_flag() {
        for network in [Network::Bitcoin, Network::BitcoinCash] {
            let built = TransactionBuilder::new(network)
                .spend_from(utxo(&P2PKH_LOCK, 100_000, network))
                .unwrap()
                .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
                .unwrap()
                .build()
                .unwrap();
            let script_sig = built.transaction.input[0].script_sig.as_bytes();
            let sig_len = script_sig[0] as usize;
            let signature = &script_sig[1..1 + sig_len];
            let flag = SighashType::for_dialect(network.params().sighash_dialect).to_byte();
            assert_eq!(signature.last(), Some(&flag));
            assert!(
                secp256k1::ecdsa::Signature::from_der(&signature[..signature.len() - 1]).is_ok()
            );
            assert_eq!(built.size(), built.raw.len());
            assert!(!built.transaction.has_witness());
        }
    }

    #[test]
    fn build_is_repeatable() {
        let builder = TransactionBuilder::new(Network::Bitcoin)
            .spend_from_with_sequence(utxo(&P2PKH_LOCK, 100_000, Network::Bitcoin), Sequence::MAX)
            .unwrap()
            .pay_to(payment(90_000))
            .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
            .unwrap()
            .version(2)
            .lock_time(500_000);
        let first = builder.build().unwrap();
        assert_eq!(first, builder.build().unwrap());
        assert_eq!(first.transaction.version, 2);
        assert_eq!(first.transaction.lock_time, 500_000);
        assert_eq!(first.transaction.input[0].sequence, Sequence::MAX);
        assert_eq!(&first.raw[first.raw.len() - 4..], &500_000u32.to_le_bytes());
    }
}
