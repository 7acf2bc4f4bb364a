//! Network selection and chain parameters shared across the btclike crates.
//!
//! Every supported chain has exactly one [`NetworkParameters`] instance living in static
//! memory. Callers select a chain with [`Network`] and read its constants through
//! [`Network::params`]; nothing here is ever mutated.

use std::fmt;

/// The UTXO chain to act on.
#[derive(Copy, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Network {
    /// Bitcoin mainnet.
    Bitcoin,
    /// Litecoin mainnet.
    Litecoin,
    /// Dogecoin mainnet.
    Dogecoin,
    /// Bitcoin Cash mainnet.
    BitcoinCash,
}

impl Network {
    /// All supported networks, in declaration order.
    pub const ALL: [Network; 4] =
        [Network::Bitcoin, Network::Litecoin, Network::Dogecoin, Network::BitcoinCash];

    /// Returns the constant parameter bundle of this chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use btclike_network::{Network, SighashDialect};
    ///
    /// let params = Network::BitcoinCash.params();
    /// assert_eq!(params.sighash_dialect, SighashDialect::Fork);
    /// assert_eq!(Network::Bitcoin.params().segwit_hrp, Some("bc"));
    /// ```
    pub fn params(self) -> &'static NetworkParameters {
        match self {
            Network::Bitcoin => &BITCOIN,
            Network::Litecoin => &LITECOIN,
            Network::Dogecoin => &DOGECOIN,
            Network::BitcoinCash => &BITCOIN_CASH,
        }
    }

    /// The SLIP-44 coin type used as the second level of BIP44-style paths.
    pub fn coin_type(self) -> u32 {
        match self {
            Network::Bitcoin => 0,
            Network::Litecoin => 2,
            Network::Dogecoin => 3,
            Network::BitcoinCash => 145,
        }
    }

    /// Finds the network and key purpose an extended key version prefix belongs to.
    ///
    /// Several chains share prefixes (BCH reuses Bitcoin's `xpub`), in which case the first
    /// match in [`Network::ALL`] order wins.
    pub fn from_key_version(version: [u8; 4]) -> Option<(Network, KeyPurpose, KeyKind)> {
        Network::ALL.into_iter().find_map(|network| {
            network.params().lookup_key_version(version).map(|(purpose, kind)| (network, purpose, kind))
        })
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Bitcoin => write!(f, "bitcoin"),
            Network::Litecoin => write!(f, "litecoin"),
            Network::Dogecoin => write!(f, "dogecoin"),
            Network::BitcoinCash => write!(f, "bitcoincash"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Network::Bitcoin),
            "litecoin" | "ltc" => Ok(Network::Litecoin),
            "dogecoin" | "doge" => Ok(Network::Dogecoin),
            "bitcoincash" | "bch" => Ok(Network::BitcoinCash),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Which signature-preimage algorithm a chain signs non-witness inputs with.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SighashDialect {
    /// Original serialization-based sighash; witness inputs use the BIP143 preimage.
    Legacy,
    /// BIP143-shaped preimage with the fork id bit set, used for replay protection.
    Fork,
}

/// Byte order of the referenced transaction id inside outpoints.
///
/// The same order is used in the signature preimage and in the serialized transaction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum OutpointOrder {
    /// Reversed relative to the hex id shown by explorers.
    Reversed,
    /// Same order as the hex id shown by explorers.
    Natural,
}

/// Derivation-purpose convention an extended key is serialized for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyPurpose {
    /// Plain SLIP-132 default of the chain.
    Slip32,
    /// BIP44 (`xpub`-style).
    Bip44,
    /// BIP49, nested segwit (`ypub`-style).
    Bip49,
    /// BIP84, native segwit (`zpub`-style).
    Bip84,
}

/// Whether a version prefix introduces a private or a public extended key.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum KeyKind {
    /// Extended private key.
    Private,
    /// Extended public key.
    Public,
}

/// Version prefix pair of one key purpose.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ExtendedKeyVersions {
    /// Prefix of serialized extended public keys.
    pub public: [u8; 4],
    /// Prefix of serialized extended private keys.
    pub private: [u8; 4],
}

impl ExtendedKeyVersions {
    const fn new(public: u32, private: u32) -> Self {
        ExtendedKeyVersions {
            public: public.to_be_bytes(),
            private: private.to_be_bytes(),
        }
    }

    /// Returns the prefix for the requested key kind.
    pub fn get(&self, kind: KeyKind) -> [u8; 4] {
        match kind {
            KeyKind::Private => self.private,
            KeyKind::Public => self.public,
        }
    }
}

/// Immutable constant bundle describing one chain.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct NetworkParameters {
    /// The chain these parameters belong to.
    pub network: Network,
    /// Version byte of Base58Check P2PKH addresses.
    pub address_version: u8,
    /// Version byte of Base58Check P2SH addresses.
    pub p2sh_version: u8,
    /// Version byte of WIF-encoded private keys.
    pub wif_version: u8,
    /// Human-readable part of bech32 segwit addresses, if the chain adopted segwit.
    pub segwit_hrp: Option<&'static str>,
    /// CashAddr prefix, for chains that use that address format.
    pub cashaddr_prefix: Option<&'static str>,
    /// Signature preimage algorithm for non-witness inputs.
    pub sighash_dialect: SighashDialect,
    /// Extended key version prefixes, indexed by [`KeyPurpose`].
    pub key_versions: [ExtendedKeyVersions; 4],
}

impl NetworkParameters {
    /// Outpoint txid byte order implied by the sighash dialect.
    pub fn outpoint_order(&self) -> OutpointOrder {
        match self.sighash_dialect {
            SighashDialect::Legacy => OutpointOrder::Reversed,
            SighashDialect::Fork => OutpointOrder::Natural,
        }
    }

    /// Whether addresses and spends of native segwit outputs are supported.
    pub fn supports_segwit(&self) -> bool {
        self.segwit_hrp.is_some()
    }

    /// Version prefixes of the given purpose.
    pub fn key_versions(&self, purpose: KeyPurpose) -> ExtendedKeyVersions {
        self.key_versions[purpose as usize]
    }

    /// Reverse lookup of an extended key prefix within this chain.
    ///
    /// Purposes are tried in declaration order, so chains that reuse one prefix for every
    /// purpose report [`KeyPurpose::Slip32`].
    pub fn lookup_key_version(&self, version: [u8; 4]) -> Option<(KeyPurpose, KeyKind)> {
        const PURPOSES: [KeyPurpose; 4] =
            [KeyPurpose::Slip32, KeyPurpose::Bip44, KeyPurpose::Bip49, KeyPurpose::Bip84];
        PURPOSES.into_iter().find_map(|purpose| {
            let versions = self.key_versions(purpose);
            if versions.public == version {
                Some((purpose, KeyKind::Public))
            } else if versions.private == version {
                Some((purpose, KeyKind::Private))
            } else {
                None
            }
        })
    }
}

const XPUB: ExtendedKeyVersions = ExtendedKeyVersions::new(0x0488b21e, 0x0488ade4);

/// Bitcoin mainnet parameters.
pub static BITCOIN: NetworkParameters = NetworkParameters {
    network: Network::Bitcoin,
    address_version: 0,
    p2sh_version: 5,
    wif_version: 128,
    segwit_hrp: Some("bc"),
    cashaddr_prefix: None,
    sighash_dialect: SighashDialect::Legacy,
    key_versions: [
        XPUB,
        XPUB,
        ExtendedKeyVersions::new(0x049d7cb2, 0x049d7878),
        ExtendedKeyVersions::new(0x04b24746, 0x04b2430c),
    ],
};

/// Litecoin mainnet parameters.
pub static LITECOIN: NetworkParameters = NetworkParameters {
    network: Network::Litecoin,
    address_version: 48,
    p2sh_version: 50,
    wif_version: 176,
    segwit_hrp: Some("ltc"),
    cashaddr_prefix: None,
    sighash_dialect: SighashDialect::Legacy,
    key_versions: [
        ExtendedKeyVersions::new(0x019da462, 0x019d9cfe),
        ExtendedKeyVersions::new(0x019da462, 0x019d9cfe),
        ExtendedKeyVersions::new(0x01b26ef6, 0x01b26792),
        ExtendedKeyVersions::new(0x01b258ad, 0x01b255bc),
    ],
};

const DGUB: ExtendedKeyVersions = ExtendedKeyVersions::new(0x02facafd, 0x02fac398);

/// Dogecoin mainnet parameters.
pub static DOGECOIN: NetworkParameters = NetworkParameters {
    network: Network::Dogecoin,
    address_version: 30,
    p2sh_version: 22,
    wif_version: 158,
    segwit_hrp: None,
    cashaddr_prefix: None,
    sighash_dialect: SighashDialect::Legacy,
    key_versions: [DGUB, DGUB, DGUB, DGUB],
};

/// Bitcoin Cash mainnet parameters.
pub static BITCOIN_CASH: NetworkParameters = NetworkParameters {
    network: Network::BitcoinCash,
    address_version: 0,
    p2sh_version: 5,
    wif_version: 128,
    segwit_hrp: None,
    cashaddr_prefix: Some("bitcoincash"),
    sighash_dialect: SighashDialect::Fork,
    key_versions: [XPUB, XPUB, XPUB, XPUB],
};
