//! Derivation tests

use std::str::FromStr;

use key_wallet::derivation::{AccountDerivation, DerivationPathBuilder, HdWallet};
use key_wallet::{DerivationPath, KeyPurpose, Network, ScriptType};
use test_utils::{PATH_SEED, TX_SEED, from_hex};

fn tx_wallet() -> HdWallet {
    HdWallet::from_seed(&from_hex(TX_SEED)).unwrap()
}

#[test]
fn test_hd_wallet_creation() {
    let wallet = tx_wallet();

    // Master key should be at depth 0
    assert_eq!(wallet.master_key().depth(), 0);
    assert_eq!(wallet.master_key().fingerprint().to_string(), "ead5064c");
    assert!(HdWallet::from_seed(&[0u8; 8]).is_err());
}

#[test]
fn test_addresses_per_chain() {
    let wallet = tx_wallet();
    // (path, bitcoin, dogecoin, litecoin)
    let vectors = [
        ("m/0", "1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", "DJV5Fi3H2tjrpqavZ59cgK6e7w65mNQsFJ", "LYZvyfQTp95dYe6Uzd9MQZzoT1j4X6gYzR"),
        ("m/1", "1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn", "DFrGuKX2dKj9ru9GqUwY83Hcps3oUczDUV", "LVw8dGtDQa4vaheqH2wGrJBn9wgnHzzof4"),
        ("m/2", "1KUu7ZvL3VUu7zuLDraoK4G9d9nTuBu48c", "DPczepryLuPBf15vxSaMrpRkWHWmEy4iRJ", "LdhrNnEA89ixNobVPza6b5KuqN9jzzFFGj"),
        ("m/0'", "17NUmP3sh8Mobh7Jcyxrnm9DM54mionoJ7", "DBWaJdzWzYG68hHuMZxRLXJpECo55aRBTY", "LRbS2bMhmnbrrVoTo7xA4nCyZHS3pyN8yU"),
        ("m/1'", "1JoCyJnJn7AiDRaQhQEbiYnD3R6tZk2reK", "DNwJWZix5X4zkRm1RzEAGJwovYqBwo4j2c", "Ld2AEX68rmQmUEGZsYDtzZqyFdUAhTwfoP"),
    ];
    for (path, btc, doge, ltc) in vectors {
        let path = DerivationPath::from_str(path).unwrap();
        for (network, expected) in [(Network::Bitcoin, btc), (Network::Dogecoin, doge), (Network::Litecoin, ltc)] {
            let address = wallet.address_at(&path, network, ScriptType::P2pkh).unwrap();
            assert_eq!(address.to_string(), expected, "{} on {}", path, network);
        }
    }
    assert_eq!(
        wallet
            .address_at(&DerivationPath::from_str("2h").unwrap(), Network::Bitcoin, ScriptType::P2pkh)
            .unwrap()
            .to_string(),
        "176M4ePod8eeFVkR1GMfnPuqHkNHfexBWz"
    );
}

#[test]
fn test_private_key_at_feeds_builder_keys() {
    let wallet = tx_wallet();
    let key = wallet.private_key_at(&DerivationPath::from_str("m/0").unwrap(), Network::Bitcoin).unwrap();
    assert_eq!(key.to_wif(), test_utils::keys::M0_WIF);
    assert!(key.compressed);
    assert_eq!(key.network, Network::Bitcoin);

    for (path, wif) in [("m/1", test_utils::keys::M1_WIF), ("m/12", test_utils::keys::M12_WIF), ("m/42", test_utils::keys::M42_WIF)] {
        let key = wallet.private_key_at(&DerivationPath::from_str(path).unwrap(), Network::Bitcoin).unwrap();
        assert_eq!(key.to_wif(), wif, "{}", path);
    }
}

#[test]
fn test_bip44_and_bip84_paths() {
    let wallet = HdWallet::from_seed(&from_hex(PATH_SEED)).unwrap();

    let bch = DerivationPathBuilder::bip44(Network::BitcoinCash, 0, 0, 0).unwrap();
    let address = wallet.address_at(&bch, Network::BitcoinCash, ScriptType::P2pkh).unwrap();
    assert_eq!(address.to_string(), "1CsB7DnDMorterzoE4TrqVsDW8PLaYVgjj");
    assert_eq!(
        address.to_cashaddr().as_deref(),
        Some("bitcoincash:qzpzd8n2hvzuelqpuhsxmmnfq47hlj8ka5unj9t8a5")
    );

    let ltc = DerivationPathBuilder::bip84(Network::Litecoin, 0, 0, 0).unwrap();
    assert_eq!(ltc.to_string(), "m/84'/2'/0'/0/0");
    assert_eq!(
        wallet.address_at(&ltc, Network::Litecoin, ScriptType::P2wpkh).unwrap().to_string(),
        "ltc1q5rkj6vydjmf7f4y06egua2yhvuktqry60gjem0"
    );
    assert_eq!(
        wallet.address_at(&ltc, Network::Litecoin, ScriptType::P2pkh).unwrap().to_string(),
        "LZtrWDgnE8XFmwDvg9FnKiFc2R6AE8uZXp"
    );
    assert_eq!(
        wallet.derive(&ltc).unwrap().pubkey_hash().to_string(),
        "a0ed2d308d96d3e4d48fd651cea897672cb00c9a"
    );
}

#[test]
fn test_segwit_rejected_for_bitcoin_cash() {
    let wallet = tx_wallet();
    let path = DerivationPathBuilder::bip84(Network::BitcoinCash, 0, 0, 0).unwrap();
    assert!(wallet.address_at(&path, Network::BitcoinCash, ScriptType::P2wpkh).is_err());
}

#[test]
fn test_account_derivation_from_xpub() {
    let wallet = HdWallet::from_seed(&from_hex(PATH_SEED)).unwrap();
    let account_path = DerivationPath::from_str("m/84'/2'/0'").unwrap();

    let xpub = wallet.account_xpub(Network::Litecoin, KeyPurpose::Bip84, 0).unwrap();
    let watch_only = key_wallet::ExtendedKey::decode(&xpub).unwrap();
    assert!(!watch_only.is_private());
    let account_key = wallet.derive_pub(&account_path).unwrap();
    // decoded keys carry no path, so compare the key material
    assert_eq!(watch_only.public_key_bytes(), account_key.public_key_bytes());
    assert_eq!(watch_only.chain_code(), account_key.chain_code());
    assert_eq!(watch_only.depth(), 3);

    let account = AccountDerivation::new(watch_only, Network::Litecoin);
    assert_eq!(
        account.receive_address(0, ScriptType::P2wpkh).unwrap().to_string(),
        "ltc1q5rkj6vydjmf7f4y06egua2yhvuktqry60gjem0"
    );

    let change_path = account_path.extend(DerivationPath::from_str("m/1/4").unwrap());
    assert_eq!(
        account.change_address(4, ScriptType::P2pkh).unwrap(),
        wallet.address_at(&change_path, Network::Litecoin, ScriptType::P2pkh).unwrap()
    );
}
