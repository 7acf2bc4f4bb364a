//! Error types for the key-wallet library

use core::fmt;

use std::error;

/// Result type alias for key-wallet operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur in key-wallet operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// BIP32 related error
    Bip32(crate::bip32::Error),
    /// Invalid mnemonic phrase
    InvalidMnemonic(bip39::Error),
    /// Address could not be built for the requested chain and script type
    Address(btclike::address::Error),
    /// Private key error
    Key(btclike::crypto::key::Error),
    /// Secp256k1 error
    Secp256k1(secp256k1::Error),
    /// Invalid parameter
    InvalidParameter(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bip32(e) => write!(f, "BIP32 error: {}", e),
            Error::InvalidMnemonic(e) => write!(f, "Invalid mnemonic: {}", e),
            Error::Address(e) => write!(f, "Address error: {}", e),
            Error::Key(e) => write!(f, "Key error: {}", e),
            Error::Secp256k1(e) => write!(f, "Secp256k1 error: {}", e),
            Error::InvalidParameter(s) => write!(f, "Invalid parameter: {}", s),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Bip32(e) => Some(e),
            Error::InvalidMnemonic(e) => Some(e),
            Error::Address(e) => Some(e),
            Error::Key(e) => Some(e),
            Error::Secp256k1(e) => Some(e),
            Error::InvalidParameter(_) => None,
        }
    }
}

impl From<crate::bip32::Error> for Error {
    fn from(e: crate::bip32::Error) -> Self {
        Error::Bip32(e)
    }
}

impl From<bip39::Error> for Error {
    fn from(e: bip39::Error) -> Self {
        Error::InvalidMnemonic(e)
    }
}

impl From<btclike::address::Error> for Error {
    fn from(e: btclike::address::Error) -> Self {
        Error::Address(e)
    }
}

impl From<btclike::crypto::key::Error> for Error {
    fn from(e: btclike::crypto::key::Error) -> Self {
        Error::Key(e)
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Error::Secp256k1(e)
    }
}
