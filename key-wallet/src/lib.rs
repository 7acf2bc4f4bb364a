//! Key Wallet Library
//!
//! Hierarchical deterministic keys for the btclike chains: BIP32 derivation, extended key
//! serialization with per-chain version prefixes, BIP39 mnemonics and a wallet facade that hands
//! out WIF-capable private keys and addresses ready for the transaction builder.
//!
//! ```rust
//! use key_wallet::{DerivationPathBuilder, HdWallet, Mnemonic, Network, ScriptType};
//!
//! let mnemonic: Mnemonic =
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
//!         .parse()
//!         .unwrap();
//! let wallet = HdWallet::from_mnemonic(&mnemonic, "").unwrap();
//! let path = DerivationPathBuilder::bip84(Network::Litecoin, 0, 0, 0).unwrap();
//! let address = wallet.address_at(&path, Network::Litecoin, ScriptType::P2wpkh).unwrap();
//! assert!(address.to_string().starts_with("ltc1q"));
//! ```

pub mod bip32;
pub mod derivation;
pub mod error;
pub mod mnemonic;
pub mod seed;

pub use btclike;

pub use bip32::{ChildNumber, DerivationPath, ExtendedKey, Fingerprint, PublicDerivation};
pub use btclike::{Address, KeyPurpose, Network, PrivateKey, ScriptType};
pub use derivation::{AccountDerivation, DerivationPathBuilder, HdWallet};
pub use error::{Error, Result};
pub use mnemonic::{Language, Mnemonic};
pub use seed::Seed;

/// Re-export commonly used types
pub mod prelude {
    pub use super::{
        Address, ChildNumber, DerivationPath, DerivationPathBuilder, Error, ExtendedKey, HdWallet,
        Mnemonic, Network, Result,
    };
}
