// SPDX-License-Identifier: CC0-1.0

//! # Rust Bitcoin-like Library
//!
//! This is a library that supports building and signing transactions for the family of
//! Bitcoin-derived UTXO chains: Bitcoin, Litecoin, Dogecoin and Bitcoin Cash.
//!
//! It covers the pieces of a wallet core that sit between a private key and a raw
//! transaction ready to broadcast:
//!
//! * address parsing and rendering (Base58Check, Bech32 and CashAddr),
//! * locking script classification and construction,
//! * WIF private keys and ECDSA signing,
//! * the three signature-preimage dialects (legacy, BIP143 and fork-id),
//! * a transaction builder doing change and fee accounting.
//!
//! Key derivation lives in the `key-wallet` crate, which hands [`PrivateKey`]s to this one.
//!
//! ```rust
//! use btclike::{Network, TransactionBuilder};
//! use btclike::builder::{PaymentOutput, UnspentOutput};
//! use btclike::PrivateKey;
//!
//! let key = PrivateKey::from_wif("KyDGxaAvG1hbc4DkyDbfyQzu2eUCBNFgoPEByV9M68kGH5QzSL34").unwrap();
//! let network = Network::Bitcoin;
//! let utxo = UnspentOutput::new(
//!     "8b328a4768f6f168799a8509e4541d7bc64e632509143c5e27328029680b6786",
//!     0,
//!     &hex::decode("76a9143f6d330ab1274be7ee7ec75a387e819874c6f9c688ac").unwrap(),
//!     100_000,
//!     key,
//! )
//! .unwrap();
//!
//! let built = TransactionBuilder::new(network)
//!     .spend_from(utxo)
//!     .unwrap()
//!     .pay_to(PaymentOutput::new("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", 90_000, network).unwrap())
//!     .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
//!     .unwrap()
//!     .set_fee(1_500)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! assert_eq!(built.transaction.output.len(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate actual_serde as serde;

pub mod address;
pub mod blockdata;
pub mod builder;
pub mod consensus;
pub mod crypto;
pub mod hash_types;

pub use btclike_network::{
    ExtendedKeyVersions, KeyKind, KeyPurpose, Network, NetworkParameters, OutpointOrder,
    SighashDialect,
};
pub use hashes;
pub use secp256k1;

pub use crate::address::{Address, Payload};
pub use crate::blockdata::script::{ScriptBuf, ScriptType};
pub use crate::blockdata::transaction::outpoint::OutPoint;
pub use crate::blockdata::transaction::txin::TxIn;
pub use crate::blockdata::transaction::txout::TxOut;
pub use crate::blockdata::transaction::witness::Witness;
pub use crate::blockdata::transaction::{Sequence, Transaction};
pub use crate::builder::{BuiltTransaction, TransactionBuilder};
pub use crate::crypto::key::PrivateKey;
pub use crate::crypto::sighash::{Sighash, SighashCache, SighashType};
pub use crate::hash_types::{PubkeyHash, ScriptHash, Txid};
