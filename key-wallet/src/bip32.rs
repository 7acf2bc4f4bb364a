//! BIP32 hierarchical deterministic keys.
//!
//! An [`ExtendedKey`] is a secp256k1 key together with the chain code and tree position needed
//! to derive further keys from it. Keys holding a private scalar derive both hardened and normal
//! children; public-only keys derive normal children only.
//!
//! Serialization uses the 78 byte BIP32 layout with the version prefixes of the selected chain
//! and [`KeyPurpose`], so the same key renders as `xprv`, `yprv`, `zprv`, `Ltpv` or `dgpv` as
//! needed.
//!
//! ```rust
//! use key_wallet::bip32::{DerivationPath, ExtendedKey};
//! use key_wallet::{KeyPurpose, Network};
//!
//! let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
//! let master = ExtendedKey::new_master(&seed).unwrap();
//! let child = master.derive_path(&"m/0'/1".parse::<DerivationPath>().unwrap()).unwrap();
//!
//! assert_eq!(child.depth(), 2);
//! assert!(child.to_public().encode(Network::Bitcoin, KeyPurpose::Bip44).starts_with("xpub"));
//! ```

use std::fmt;
use std::ops::Index;
use std::slice;
use std::str::FromStr;
use std::sync::OnceLock;

use btclike::{KeyKind, KeyPurpose, Network, PrivateKey, PubkeyHash};
use hashes::{Hash, HashEngine, hash_newtype, hash160, hmac, sha512};
use secp256k1::{PublicKey, SECP256K1, Scalar, SecretKey};

/// HMAC key of the master key derivation.
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Seeds shorter than this are rejected as brute-forceable.
pub const MIN_SEED_LEN: usize = 9;

/// Length of a serialized extended key, before the Base58Check checksum.
const ENCODED_LEN: usize = 78;

const HARDENED_BIT: u32 = 1 << 31;

hash_newtype! {
    /// HASH160 of an extended key's compressed public key.
    pub struct XpubIdentifier(hash160::Hash);
}

/// A chain code.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainCode([u8; 32]);

impl ChainCode {
    /// Wraps raw chain code bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        ChainCode(bytes)
    }

    /// Returns the chain code bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for ChainCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ChainCode({})", hex::encode(self.0))
    }
}

/// A key fingerprint: the first four bytes of its [`XpubIdentifier`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Fingerprint([u8; 4]);

impl Fingerprint {
    /// Wraps raw fingerprint bytes.
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Fingerprint(bytes)
    }

    /// Returns the fingerprint bytes.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

/// A child number for a derived key
#[derive(Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub enum ChildNumber {
    /// Non-hardened key
    Normal {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
    /// Hardened key
    Hardened {
        /// Key index, within [0, 2^31 - 1]
        index: u32,
    },
}

impl ChildNumber {
    /// The first normal child, also the child number of master keys.
    pub const ZERO: ChildNumber = ChildNumber::Normal {
        index: 0,
    };

    /// Create a [`Normal`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Normal`]: #variant.Normal
    pub fn from_normal_idx(index: u32) -> Result<Self, Error> {
        if index & HARDENED_BIT == 0 {
            Ok(ChildNumber::Normal {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Create a [`Hardened`] from an index, returns an error if the index is not within
    /// [0, 2^31 - 1].
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn from_hardened_idx(index: u32) -> Result<Self, Error> {
        if index & HARDENED_BIT == 0 {
            Ok(ChildNumber::Hardened {
                index,
            })
        } else {
            Err(Error::InvalidChildNumber(index))
        }
    }

    /// Returns `true` if the child number is a [`Normal`] value.
    ///
    /// [`Normal`]: #variant.Normal
    pub fn is_normal(&self) -> bool {
        !self.is_hardened()
    }

    /// Returns `true` if the child number is a [`Hardened`] value.
    ///
    /// [`Hardened`]: #variant.Hardened
    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildNumber::Hardened { .. })
    }

    /// The index without the hardened bit.
    pub fn index(&self) -> u32 {
        match *self {
            ChildNumber::Normal {
                index,
            }
            | ChildNumber::Hardened {
                index,
            } => index,
        }
    }
}

impl From<u32> for ChildNumber {
    fn from(number: u32) -> Self {
        if number & HARDENED_BIT != 0 {
            ChildNumber::Hardened {
                index: number ^ HARDENED_BIT,
            }
        } else {
            ChildNumber::Normal {
                index: number,
            }
        }
    }
}

impl From<ChildNumber> for u32 {
    fn from(cnum: ChildNumber) -> Self {
        match cnum {
            ChildNumber::Normal {
                index,
            } => index,
            ChildNumber::Hardened {
                index,
            } => index | HARDENED_BIT,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ChildNumber::Hardened {
                index,
            } => {
                fmt::Display::fmt(&index, f)?;
                f.write_str(if f.alternate() { "h" } else { "'" })
            }
            ChildNumber::Normal {
                index,
            } => fmt::Display::fmt(&index, f),
        }
    }
}

impl FromStr for ChildNumber {
    type Err = Error;

    fn from_str(inp: &str) -> Result<ChildNumber, Error> {
        let parse = |digits: &str| {
            // u32 parsing would accept a leading '+'
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidChildNumberFormat);
            }
            digits.parse::<u32>().map_err(|_| Error::InvalidChildNumberFormat)
        };
        match inp.strip_suffix(['\'', 'h', 'H']) {
            Some(digits) => ChildNumber::from_hardened_idx(parse(digits)?),
            None => ChildNumber::from_normal_idx(parse(inp)?),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ChildNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(ChildNumber::from)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChildNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        u32::from(*self).serialize(serializer)
    }
}

/// A BIP-32 derivation path.
///
/// Parsing accepts an optional leading `m` and the hardened markers `'`, `h` and `H`, so
/// `m/44'/0'/0'/0/0`, `44h/0h/0h/0/0` and `m/44H/0H/0H/0/0` are the same path.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// The empty path of a master key.
    pub fn master() -> DerivationPath {
        DerivationPath(Vec::new())
    }

    /// Returns `true` for the empty path.
    pub fn is_master(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of derivation steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the derivation path is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Create a new [DerivationPath] that is a child of this one.
    pub fn child(&self, cn: ChildNumber) -> DerivationPath {
        let mut path = self.0.clone();
        path.push(cn);
        DerivationPath(path)
    }

    /// Appends a child number in place.
    pub fn push(&mut self, cn: ChildNumber) {
        self.0.push(cn);
    }

    /// Concatenate `self` with `path` and return the resulting new path.
    pub fn extend<T: AsRef<[ChildNumber]>>(&self, path: T) -> DerivationPath {
        let mut new_path = self.clone();
        new_path.0.extend_from_slice(path.as_ref());
        new_path
    }

    /// The last step of the path, if any.
    pub fn last(&self) -> Option<ChildNumber> {
        self.0.last().copied()
    }
}

impl<I> Index<I> for DerivationPath
where
    Vec<ChildNumber>: Index<I>,
{
    type Output = <Vec<ChildNumber> as Index<I>>::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<ChildNumber>> for DerivationPath {
    fn from(numbers: Vec<ChildNumber>) -> Self {
        DerivationPath(numbers)
    }
}

impl From<&[ChildNumber]> for DerivationPath {
    fn from(numbers: &[ChildNumber]) -> Self {
        DerivationPath(numbers.to_vec())
    }
}

impl From<DerivationPath> for Vec<ChildNumber> {
    fn from(path: DerivationPath) -> Self {
        path.0
    }
}

impl FromIterator<ChildNumber> for DerivationPath {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        DerivationPath(Vec::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildNumber;
    type IntoIter = slice::Iter<'a, ChildNumber>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath, Error> {
        if path.is_empty() {
            return Err(Error::InvalidDerivationPathFormat);
        }
        let mut parts = path.split('/').peekable();
        if parts.peek() == Some(&"m") {
            parts.next();
        }
        parts.map(str::parse::<ChildNumber>).collect()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for cn in self.0.iter() {
            f.write_str("/")?;
            fmt::Display::fmt(cn, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A BIP32 error
#[derive(Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A hardened child was requested from public data only
    CannotDeriveFromHardenedKey,
    /// The key has no private scalar
    PrivateKeyUnavailable,
    /// A child number was provided that was out of range
    InvalidChildNumber(u32),
    /// Invalid childnumber format.
    InvalidChildNumberFormat,
    /// Invalid derivation path format.
    InvalidDerivationPathFormat,
    /// The seed is too short to be safe
    SeedTooShort(usize),
    /// The seed hashes to a scalar that isn't a valid private key
    InvalidMasterKey,
    /// Derivation at this index produced an invalid key; the next index should be used
    InvalidChildKey(ChildNumber),
    /// A key at depth 255 can't have children
    MaximumDepthExceeded,
    /// A secp256k1 error occurred
    Secp256k1(secp256k1::Error),
    /// Base58 decoding or checksum error
    Base58(bs58::decode::Error),
    /// Unknown version magic bytes
    UnknownVersion([u8; 4]),
    /// Encoded extended key data has wrong length
    WrongExtendedKeyLength(usize),
    /// Serialized private keys are prefixed with a zero byte
    InvalidPrivateKeyPrefix(u8),
    /// Serialized public keys are compressed
    InvalidPublicKeyPrefix(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::CannotDeriveFromHardenedKey => {
                f.write_str("hardened derivation requires private key")
            }
            Error::PrivateKeyUnavailable => f.write_str("private key unavailable"),
            Error::InvalidChildNumber(ref n) => {
                write!(f, "child number {} is invalid (not within [0, 2^31 - 1])", n)
            }
            Error::InvalidChildNumberFormat => f.write_str("invalid child number format"),
            Error::InvalidDerivationPathFormat => f.write_str("invalid derivation path format"),
            Error::SeedTooShort(len) => {
                write!(f, "seed of {} bytes is too short, at least {} required", len, MIN_SEED_LEN)
            }
            Error::InvalidMasterKey => f.write_str("seed produced an invalid master key"),
            Error::InvalidChildKey(ref cn) => {
                write!(f, "illegal derived key at child {}, use the next index", cn)
            }
            Error::MaximumDepthExceeded => f.write_str("maximum derivation depth exceeded"),
            Error::Secp256k1(ref e) => write!(f, "secp256k1 error: {}", e),
            Error::Base58(ref e) => write!(f, "base58 encoding error: {}", e),
            Error::UnknownVersion(ref bytes) => {
                write!(f, "unknown version magic bytes: {}", hex::encode(bytes))
            }
            Error::WrongExtendedKeyLength(ref len) => {
                write!(f, "encoded extended key data has wrong length {}", len)
            }
            Error::InvalidPrivateKeyPrefix(b) => {
                write!(f, "private key data must start with 0x00, got {:#04x}", b)
            }
            Error::InvalidPublicKeyPrefix(b) => {
                write!(f, "public key data must be compressed, got prefix {:#04x}", b)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Secp256k1(e) => Some(e),
            Error::Base58(e) => Some(e),
            _ => None,
        }
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Error {
        Error::Secp256k1(e)
    }
}

impl From<bs58::decode::Error> for Error {
    fn from(e: bs58::decode::Error) -> Error {
        Error::Base58(e)
    }
}

/// How a public-only child point is computed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PublicDerivation {
    /// `parent + I_L·G`.
    #[default]
    Normal,
    /// `(I_L + r)·G + (-r)·G + parent` for a fresh random `r`, so the multiplication never runs
    /// on `I_L` alone. The resulting point is identical.
    Blinded,
}

/// A compressed public key whose curve point is only decompressed on first use.
///
/// Keys decoded from a string keep their 33 bytes as read; identifiers and serialization never
/// need the point, only derivation does.
#[derive(Clone)]
pub struct LazyPublicKey {
    encoded: [u8; 33],
    point: OnceLock<PublicKey>,
}

impl LazyPublicKey {
    /// Wraps an already decoded point.
    pub fn from_point(point: PublicKey) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(point);
        LazyPublicKey {
            encoded: point.serialize(),
            point: cell,
        }
    }

    /// Wraps compressed bytes without validating them.
    pub fn from_encoded(encoded: [u8; 33]) -> Self {
        LazyPublicKey {
            encoded,
            point: OnceLock::new(),
        }
    }

    /// The compressed serialization.
    pub fn encoded(&self) -> &[u8; 33] {
        &self.encoded
    }

    /// Whether the point has been decompressed yet.
    pub fn is_decoded(&self) -> bool {
        self.point.get().is_some()
    }

    /// Returns the point, decompressing and caching it on first call.
    pub fn point(&self) -> Result<PublicKey, secp256k1::Error> {
        if let Some(point) = self.point.get() {
            return Ok(*point);
        }
        let point = PublicKey::from_slice(&self.encoded)?;
        Ok(*self.point.get_or_init(|| point))
    }
}

impl PartialEq for LazyPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.encoded == other.encoded
    }
}

impl Eq for LazyPublicKey {}

impl std::hash::Hash for LazyPublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.encoded.hash(state);
    }
}

impl fmt::Debug for LazyPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LazyPublicKey({})", hex::encode(self.encoded))
    }
}

/// A node of a BIP32 key tree.
///
/// Holds the private scalar when one is known. Derivation always returns a new key; a public-only
/// projection is made explicitly with [`ExtendedKey::to_public`].
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    private_key: Option<SecretKey>,
    public_key: LazyPublicKey,
    chain_code: ChainCode,
    depth: u8,
    parent_fingerprint: Fingerprint,
    child_number: ChildNumber,
    path: Option<DerivationPath>,
}

impl ExtendedKey {
    /// Construct a new master key from a seed value
    pub fn new_master(seed: &[u8]) -> Result<ExtendedKey, Error> {
        if seed.len() < MIN_SEED_LEN {
            tracing::debug!(len = seed.len(), "rejecting short master seed");
            return Err(Error::SeedTooShort(seed.len()));
        }
        let mut engine = hmac::HmacEngine::<sha512::Hash>::new(MASTER_KEY_DOMAIN);
        engine.input(seed);
        let (secret, chain_code) = split_hmac(hmac::Hmac::from_engine(engine));
        let secret = SecretKey::from_byte_array(&secret).map_err(|_| {
            tracing::debug!("seed produced an out of range master scalar");
            Error::InvalidMasterKey
        })?;

        Ok(ExtendedKey {
            private_key: Some(secret),
            public_key: LazyPublicKey::from_point(PublicKey::from_secret_key(SECP256K1, &secret)),
            chain_code,
            depth: 0,
            parent_fingerprint: Fingerprint::default(),
            child_number: ChildNumber::ZERO,
            path: Some(DerivationPath::master()),
        })
    }

    /// Derives one child.
    ///
    /// Uses private derivation when this key holds a scalar, otherwise normal public derivation,
    /// in which case hardened children are rejected.
    pub fn derive_child(&self, child: ChildNumber) -> Result<ExtendedKey, Error> {
        match self.private_key {
            Some(secret) => self.derive_private_child(secret, child),
            None => self.derive_public_child(child, PublicDerivation::Normal),
        }
    }

    /// Attempts to derive an extended key from a path.
    ///
    /// The `path` argument can be both of type `DerivationPath` or `Vec<ChildNumber>`.
    pub fn derive_path<P: AsRef<[ChildNumber]>>(&self, path: &P) -> Result<ExtendedKey, Error> {
        let mut key = self.clone();
        for cnum in path.as_ref() {
            key = key.derive_child(*cnum)?;
        }
        Ok(key)
    }

    /// Public parent to public child derivation.
    ///
    /// Only the public point and chain code are used, even if this key holds a scalar, and the
    /// child is always public-only.
    pub fn derive_public_child(
        &self,
        child: ChildNumber,
        mode: PublicDerivation,
    ) -> Result<ExtendedKey, Error> {
        if child.is_hardened() {
            tracing::debug!(%child, "rejecting hardened derivation from a public key");
            return Err(Error::CannotDeriveFromHardenedKey);
        }
        let depth = self.next_depth()?;
        let (tweak, chain_code) = self.child_hmac(&self.public_key.encoded, child);
        let scalar = Scalar::from_be_bytes(tweak).map_err(|_| self.reject(child))?;
        let parent = self.public_key.point()?;
        let point = match mode {
            PublicDerivation::Normal => parent.add_exp_tweak(SECP256K1, &scalar),
            PublicDerivation::Blinded => blinded_tweak_add(&parent, &tweak),
        }
        .map_err(|_| self.reject(child))?;

        Ok(ExtendedKey {
            private_key: None,
            public_key: LazyPublicKey::from_point(point),
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
            path: self.path.as_ref().map(|path| path.child(child)),
        })
    }

    fn derive_private_child(
        &self,
        secret: SecretKey,
        child: ChildNumber,
    ) -> Result<ExtendedKey, Error> {
        let depth = self.next_depth()?;
        let (tweak, chain_code) = if child.is_hardened() {
            let mut data = [0u8; 33];
            data[1..].copy_from_slice(&secret.secret_bytes());
            self.child_hmac(&data, child)
        } else {
            self.child_hmac(&self.public_key.encoded, child)
        };
        let scalar = Scalar::from_be_bytes(tweak).map_err(|_| self.reject(child))?;
        let derived = secret.add_tweak(&scalar).map_err(|_| self.reject(child))?;

        Ok(ExtendedKey {
            private_key: Some(derived),
            public_key: LazyPublicKey::from_point(PublicKey::from_secret_key(SECP256K1, &derived)),
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_number: child,
            path: self.path.as_ref().map(|path| path.child(child)),
        })
    }

    fn child_hmac(&self, key_data: &[u8], child: ChildNumber) -> ([u8; 32], ChainCode) {
        let mut engine = hmac::HmacEngine::<sha512::Hash>::new(self.chain_code.as_bytes());
        engine.input(key_data);
        engine.input(&u32::from(child).to_be_bytes());
        split_hmac(hmac::Hmac::from_engine(engine))
    }

    fn next_depth(&self) -> Result<u8, Error> {
        self.depth.checked_add(1).ok_or(Error::MaximumDepthExceeded)
    }

    fn reject(&self, child: ChildNumber) -> Error {
        tracing::debug!(%child, depth = self.depth, "derived key is invalid");
        Error::InvalidChildKey(child)
    }

    /// The public-only projection of this key.
    pub fn to_public(&self) -> ExtendedKey {
        ExtendedKey {
            private_key: None,
            ..self.clone()
        }
    }

    /// Whether this key holds a private scalar.
    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    /// The private scalar.
    pub fn private_key(&self) -> Result<SecretKey, Error> {
        self.private_key.ok_or(Error::PrivateKeyUnavailable)
    }

    /// A compressed, WIF-capable private key for the given chain.
    pub fn to_private_key(&self, network: Network) -> Result<PrivateKey, Error> {
        Ok(PrivateKey::new(self.private_key()?, network))
    }

    /// The public point.
    ///
    /// Fails only for keys decoded from a string whose bytes are not a point on the curve.
    pub fn public_key(&self) -> Result<PublicKey, Error> {
        Ok(self.public_key.point()?)
    }

    /// The compressed public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key.encoded
    }

    /// The public key storage, exposing whether the point has been decoded.
    pub fn lazy_public_key(&self) -> &LazyPublicKey {
        &self.public_key
    }

    /// Returns the HASH160 of the compressed public key
    pub fn identifier(&self) -> XpubIdentifier {
        XpubIdentifier::hash(&self.public_key.encoded)
    }

    /// The identifier as the hash P2PKH and P2WPKH scripts commit to
    pub fn pubkey_hash(&self) -> PubkeyHash {
        PubkeyHash::from_byte_array(self.identifier().to_byte_array())
    }

    /// Returns the first four bytes of the identifier
    pub fn fingerprint(&self) -> Fingerprint {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.identifier().as_byte_array()[..4]);
        Fingerprint(bytes)
    }

    /// Fingerprint of the parent, zero for master keys.
    pub fn parent_fingerprint(&self) -> Fingerprint {
        self.parent_fingerprint
    }

    /// The chain code.
    pub fn chain_code(&self) -> ChainCode {
        self.chain_code
    }

    /// Number of derivations from the master key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The index this key was derived at, [`ChildNumber::ZERO`] for master keys.
    pub fn child_number(&self) -> ChildNumber {
        self.child_number
    }

    /// Path from the master key, `None` for keys decoded from a string.
    pub fn path(&self) -> Option<&DerivationPath> {
        self.path.as_ref()
    }

    /// Serializes the key with the version prefix of `network` and `purpose`.
    ///
    /// Keys holding a scalar serialize as private keys; call [`ExtendedKey::to_public`] first
    /// for the public form.
    pub fn encode(&self, network: Network, purpose: KeyPurpose) -> String {
        let versions = network.params().key_versions(purpose);
        let mut ret = [0u8; ENCODED_LEN];
        match self.private_key {
            Some(secret) => {
                ret[0..4].copy_from_slice(&versions.get(KeyKind::Private));
                ret[46..78].copy_from_slice(&secret.secret_bytes());
            }
            None => {
                ret[0..4].copy_from_slice(&versions.get(KeyKind::Public));
                ret[45..78].copy_from_slice(&self.public_key.encoded);
            }
        }
        ret[4] = self.depth;
        ret[5..9].copy_from_slice(&self.parent_fingerprint.0);
        ret[9..13].copy_from_slice(&u32::from(self.child_number).to_be_bytes());
        ret[13..45].copy_from_slice(&self.chain_code.0);
        bs58::encode(ret).with_check().into_string()
    }

    /// Parses a Base58Check extended key of any supported chain and purpose.
    pub fn decode(s: &str) -> Result<ExtendedKey, Error> {
        Self::decode_versioned(s).map(|(key, _, _)| key)
    }

    /// Like [`ExtendedKey::decode`], also returning the chain and purpose the version prefix
    /// belongs to.
    ///
    /// Prefixes shared between chains resolve to the first chain in [`Network::ALL`] order, so
    /// a Bitcoin Cash `xpub` reports [`Network::Bitcoin`].
    pub fn decode_versioned(s: &str) -> Result<(ExtendedKey, Network, KeyPurpose), Error> {
        let data = bs58::decode(s).with_check(None).into_vec()?;
        if data.len() != ENCODED_LEN {
            return Err(Error::WrongExtendedKeyLength(data.len()));
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&data[0..4]);
        let (network, purpose, kind) =
            Network::from_key_version(version).ok_or(Error::UnknownVersion(version))?;

        let (private_key, public_key) = match kind {
            KeyKind::Private => {
                if data[45] != 0 {
                    return Err(Error::InvalidPrivateKeyPrefix(data[45]));
                }
                let secret = SecretKey::from_slice(&data[46..78])?;
                (Some(secret), LazyPublicKey::from_point(PublicKey::from_secret_key(SECP256K1, &secret)))
            }
            KeyKind::Public => {
                if data[45] != 0x02 && data[45] != 0x03 {
                    return Err(Error::InvalidPublicKeyPrefix(data[45]));
                }
                let mut encoded = [0u8; 33];
                encoded.copy_from_slice(&data[45..78]);
                (None, LazyPublicKey::from_encoded(encoded))
            }
        };

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let mut child_number = [0u8; 4];
        child_number.copy_from_slice(&data[9..13]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);

        let key = ExtendedKey {
            private_key,
            public_key,
            chain_code: ChainCode(chain_code),
            depth: data[4],
            parent_fingerprint: Fingerprint(parent_fingerprint),
            child_number: u32::from_be_bytes(child_number).into(),
            path: None,
        };
        Ok((key, network, purpose))
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private_key", &self.private_key.map(|_| "[SecretKey]"))
            .field("public_key", &self.public_key)
            .field("chain_code", &self.chain_code)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &self.parent_fingerprint)
            .field("child_number", &self.child_number)
            .field("path", &self.path)
            .finish()
    }
}

/// Splits a 64 byte HMAC into `I_L` and the chain code `I_R`.
fn split_hmac(hmac: hmac::Hmac<sha512::Hash>) -> ([u8; 32], ChainCode) {
    let bytes = hmac.to_byte_array();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&bytes[..32]);
    right.copy_from_slice(&bytes[32..]);
    (left, ChainCode(right))
}

fn blinded_tweak_add(parent: &PublicKey, tweak: &[u8; 32]) -> Result<PublicKey, secp256k1::Error> {
    let blind = SecretKey::new(&mut rand::thread_rng());
    let blinded = SecretKey::from_byte_array(tweak)?.add_tweak(&Scalar::from(blind))?;
    let blinded_point = PublicKey::from_secret_key(SECP256K1, &blinded);
    let unblind_point = PublicKey::from_secret_key(SECP256K1, &blind.negate());
    PublicKey::combine_keys(&[&blinded_point, &unblind_point, parent])
}
