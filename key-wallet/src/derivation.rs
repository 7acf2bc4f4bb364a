//! Key derivation functionality
//!
//! [`HdWallet`] owns a master key and hands out chain-specific private keys and addresses for
//! derivation paths. [`DerivationPathBuilder`] assembles the BIP44/49/84 paths for each chain.

use btclike::{Address, KeyPurpose, Network, PrivateKey, ScriptType};

use crate::bip32::{ChildNumber, DerivationPath, ExtendedKey};
use crate::error::{Error, Result};
use crate::mnemonic::Mnemonic;
use crate::seed::Seed;

/// HD Wallet implementation
#[derive(Clone)]
pub struct HdWallet {
    master_key: ExtendedKey,
}

impl core::fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HdWallet")
            .field("master_key", &"<hidden>")
            .field("fingerprint", &self.master_key.fingerprint())
            .finish()
    }
}

impl HdWallet {
    /// Create a new HD wallet from a master key
    ///
    /// The key must hold its private scalar.
    pub fn new(master_key: ExtendedKey) -> Result<Self> {
        if !master_key.is_private() {
            return Err(Error::Bip32(crate::bip32::Error::PrivateKeyUnavailable));
        }
        Ok(Self {
            master_key,
        })
    }

    /// Create from a seed
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let master_key = ExtendedKey::new_master(seed)?;
        Self::new(master_key)
    }

    /// Create from a mnemonic and its passphrase, empty when none was set
    pub fn from_mnemonic(mnemonic: &Mnemonic, passphrase: &str) -> Result<Self> {
        Self::from_seed(mnemonic.to_seed(passphrase).as_bytes())
    }

    /// Create from a [`Seed`]
    pub fn from_seed_value(seed: &Seed) -> Result<Self> {
        Self::from_seed(seed.as_bytes())
    }

    /// Get the master extended private key
    pub fn master_key(&self) -> &ExtendedKey {
        &self.master_key
    }

    /// Get the master extended public key
    pub fn master_pub_key(&self) -> ExtendedKey {
        self.master_key.to_public()
    }

    /// Derive a key at the given path
    pub fn derive(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        Ok(self.master_key.derive_path(path)?)
    }

    /// Derive a public key at the given path
    pub fn derive_pub(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        Ok(self.derive(path)?.to_public())
    }

    /// Compressed private key at `path`, ready for WIF export or signing on `network`
    pub fn private_key_at(&self, path: &DerivationPath, network: Network) -> Result<PrivateKey> {
        Ok(self.derive(path)?.to_private_key(network)?)
    }

    /// Address of the key at `path`
    pub fn address_at(
        &self,
        path: &DerivationPath,
        network: Network,
        script_type: ScriptType,
    ) -> Result<Address> {
        let key = self.private_key_at(path, network)?;
        Ok(Address::from_private_key(&key, script_type)?)
    }

    /// Serialized account-level extended public key, `m/purpose'/coin'/account'`
    pub fn account_xpub(&self, network: Network, purpose: KeyPurpose, account: u32) -> Result<String> {
        let path = DerivationPathBuilder::new()
            .purpose(purpose_index(purpose))
            .coin_type(network.coin_type())
            .account(account)
            .build()?;
        Ok(self.derive_pub(&path)?.encode(network, purpose))
    }
}

/// Address derivation below an account key
///
/// Works from an extended public key as well; [`AccountDerivation::receive_address`] and
/// [`AccountDerivation::change_address`] only use normal derivation.
#[derive(Debug, Clone)]
pub struct AccountDerivation {
    account_key: ExtendedKey,
    network: Network,
}

impl AccountDerivation {
    /// Create a new account derivation
    pub fn new(account_key: ExtendedKey, network: Network) -> Self {
        Self {
            account_key,
            network,
        }
    }

    /// Derive an external (receive) key at index
    pub fn receive_key(&self, index: u32) -> Result<ExtendedKey> {
        self.leaf(0, index)
    }

    /// Derive an internal (change) key at index
    pub fn change_key(&self, index: u32) -> Result<ExtendedKey> {
        self.leaf(1, index)
    }

    /// Derive an external (receive) address at index
    pub fn receive_address(&self, index: u32, script_type: ScriptType) -> Result<Address> {
        self.address(self.receive_key(index)?, script_type)
    }

    /// Derive an internal (change) address at index
    pub fn change_address(&self, index: u32, script_type: ScriptType) -> Result<Address> {
        self.address(self.change_key(index)?, script_type)
    }

    fn leaf(&self, change: u32, index: u32) -> Result<ExtendedKey> {
        let path = [ChildNumber::from_normal_idx(change)?, ChildNumber::from_normal_idx(index)?];
        Ok(self.account_key.derive_path(&path)?)
    }

    fn address(&self, key: ExtendedKey, script_type: ScriptType) -> Result<Address> {
        let pubkey_hash = key.pubkey_hash();
        let address = match script_type {
            ScriptType::P2pkh => Address::p2pkh(pubkey_hash, self.network),
            ScriptType::P2sh => Address::p2shwpkh(pubkey_hash, self.network)?,
            ScriptType::P2wpkh => Address::p2wpkh(pubkey_hash, self.network)?,
        };
        Ok(address)
    }
}

/// Builder for constructing derivation paths
#[derive(Debug, Clone, Default)]
pub struct DerivationPathBuilder {
    components: Vec<ChildNumber>,
    purpose: Option<u32>,
    coin_type: Option<u32>,
    account: Option<u32>,
    change: Option<u32>,
    address_index: Option<u32>,
}

impl DerivationPathBuilder {
    /// Create a new derivation path builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set purpose (BIP44 = 44', BIP84 = 84', etc.)
    pub fn purpose(mut self, purpose: u32) -> Self {
        self.purpose = Some(purpose);
        self
    }

    /// Set the SLIP-44 coin type
    pub fn coin_type(mut self, coin_type: u32) -> Self {
        self.coin_type = Some(coin_type);
        self
    }

    /// Set account index
    pub fn account(mut self, account: u32) -> Self {
        self.account = Some(account);
        self
    }

    /// Set change (0 for external, 1 for internal)
    pub fn change(mut self, change: u32) -> Self {
        self.change = Some(change);
        self
    }

    /// Set address index
    pub fn address_index(mut self, index: u32) -> Self {
        self.address_index = Some(index);
        self
    }

    /// Add a hardened child number
    pub fn hardened(mut self, index: u32) -> Result<Self> {
        self.components.push(ChildNumber::from_hardened_idx(index)?);
        Ok(self)
    }

    /// Add a normal (non-hardened) child number
    pub fn normal(mut self, index: u32) -> Result<Self> {
        self.components.push(ChildNumber::from_normal_idx(index)?);
        Ok(self)
    }

    /// Add a child number
    pub fn child(mut self, child: ChildNumber) -> Self {
        self.components.push(child);
        self
    }

    /// `m/44'/coin'/account'/change/index`, legacy P2PKH addresses
    pub fn bip44(network: Network, account: u32, change: u32, index: u32) -> Result<DerivationPath> {
        Self::purpose_path(44, network, account, change, index)
    }

    /// `m/49'/coin'/account'/change/index`, nested segwit addresses
    pub fn bip49(network: Network, account: u32, change: u32, index: u32) -> Result<DerivationPath> {
        Self::purpose_path(49, network, account, change, index)
    }

    /// `m/84'/coin'/account'/change/index`, native segwit addresses
    pub fn bip84(network: Network, account: u32, change: u32, index: u32) -> Result<DerivationPath> {
        Self::purpose_path(84, network, account, change, index)
    }

    fn purpose_path(
        purpose: u32,
        network: Network,
        account: u32,
        change: u32,
        index: u32,
    ) -> Result<DerivationPath> {
        Self::new()
            .purpose(purpose)
            .coin_type(network.coin_type())
            .account(account)
            .change(change)
            .address_index(index)
            .build()
    }

    /// Build a BIP32 path from the components
    ///
    /// Explicit components win over the purpose/coin/account fields. Purpose, coin type and
    /// account are hardened, change and address index are not.
    pub fn build(self) -> Result<DerivationPath> {
        if !self.components.is_empty() {
            return Ok(DerivationPath::from(self.components));
        }

        let mut path = Vec::new();
        for hardened in [self.purpose, self.coin_type, self.account].into_iter().flatten() {
            path.push(ChildNumber::from_hardened_idx(hardened)?);
        }
        for normal in [self.change, self.address_index].into_iter().flatten() {
            path.push(ChildNumber::from_normal_idx(normal)?);
        }
        Ok(DerivationPath::from(path))
    }
}

fn purpose_index(purpose: KeyPurpose) -> u32 {
    match purpose {
        KeyPurpose::Slip32 | KeyPurpose::Bip44 => 44,
        KeyPurpose::Bip49 => 49,
        KeyPurpose::Bip84 => 84,
    }
}
