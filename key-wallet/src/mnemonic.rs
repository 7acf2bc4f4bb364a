//! BIP39 Mnemonic implementation

use core::fmt;
use core::str::FromStr;

use rand::RngCore;

use crate::bip32::ExtendedKey;
use crate::error::{Error, Result};
use crate::seed::Seed;

/// Language for mnemonic generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    ChineseSimplified,
    ChineseTraditional,
    Czech,
    French,
    Italian,
    Japanese,
    Korean,
    Portuguese,
    Spanish,
}

impl From<Language> for bip39::Language {
    fn from(lang: Language) -> Self {
        match lang {
            Language::English => bip39::Language::English,
            Language::ChineseSimplified => bip39::Language::SimplifiedChinese,
            Language::ChineseTraditional => bip39::Language::TraditionalChinese,
            Language::Czech => bip39::Language::Czech,
            Language::French => bip39::Language::French,
            Language::Italian => bip39::Language::Italian,
            Language::Japanese => bip39::Language::Japanese,
            Language::Korean => bip39::Language::Korean,
            Language::Portuguese => bip39::Language::Portuguese,
            Language::Spanish => bip39::Language::Spanish,
        }
    }
}

/// BIP39 Mnemonic phrase
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
}

impl Mnemonic {
    /// Generate a new mnemonic with the specified word count
    pub fn generate(word_count: usize, language: Language) -> Result<Self> {
        let entropy_bytes = match word_count {
            12 | 15 | 18 | 21 | 24 => word_count / 3 * 4,
            _ => return Err(Error::InvalidMnemonic(bip39::Error::BadWordCount(word_count))),
        };

        let mut entropy = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut entropy[..entropy_bytes]);
        let mnemonic = Self::from_entropy(&entropy[..entropy_bytes], language);
        entropy.iter_mut().for_each(|b| *b = 0);
        mnemonic
    }

    /// Create a mnemonic from a phrase
    pub fn from_phrase(phrase: &str, language: Language) -> Result<Self> {
        let inner = bip39::Mnemonic::parse_in(language.into(), phrase)?;
        Ok(Self {
            inner,
        })
    }

    /// Create a mnemonic from entropy bytes
    pub fn from_entropy(entropy: &[u8], language: Language) -> Result<Self> {
        let inner = bip39::Mnemonic::from_entropy_in(language.into(), entropy)?;
        Ok(Self {
            inner,
        })
    }

    /// Get the mnemonic phrase as a string
    pub fn phrase(&self) -> String {
        self.inner.words().collect::<Vec<_>>().join(" ")
    }

    /// Get the word count
    pub fn word_count(&self) -> usize {
        self.inner.word_count()
    }

    /// The entropy the phrase encodes, without its checksum bits
    pub fn to_entropy(&self) -> Vec<u8> {
        self.inner.to_entropy()
    }

    /// Convert to seed with optional passphrase
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed::new(self.inner.to_seed(passphrase))
    }

    /// Derive the master extended key from this mnemonic
    pub fn to_extended_key(&self, passphrase: &str) -> Result<ExtendedKey> {
        self.to_seed(passphrase).to_master_key()
    }

    /// Validate a mnemonic phrase
    pub fn validate(phrase: &str, language: Language) -> bool {
        bip39::Mnemonic::parse_in(language.into(), phrase).is_ok()
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_phrase(s, Language::English)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic({} words)", self.word_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mnemonic_generation() {
        for words in [12, 15, 18, 21, 24] {
            let mnemonic = Mnemonic::generate(words, Language::English).unwrap();
            assert_eq!(mnemonic.word_count(), words);
            assert!(Mnemonic::validate(&mnemonic.phrase(), Language::English));
        }
        assert_eq!(
            Mnemonic::generate(13, Language::English).unwrap_err(),
            Error::InvalidMnemonic(bip39::Error::BadWordCount(13))
        );
    }

    #[test]
    fn test_mnemonic_validation() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        assert!(Mnemonic::validate(phrase, Language::English));
        // last word breaks the checksum
        let bad = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!Mnemonic::validate(bad, Language::English));
    }

    #[test]
    fn test_entropy_round_trip() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16], Language::English).unwrap();
        assert!(mnemonic.phrase().ends_with("abandon about"));
        assert_eq!(mnemonic.to_entropy(), vec![0u8; 16]);
        assert_eq!(format!("{:?}", mnemonic), "Mnemonic(12 words)");
    }
}
