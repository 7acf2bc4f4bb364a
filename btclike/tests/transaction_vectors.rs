//! Signed transaction vectors for every supported chain.

use btclike::builder::{BuilderError, PaymentOutput, TransactionBuilder, UnspentOutput};
use btclike::hashes::Hash;
use btclike::{Address, Network, PrivateKey, PubkeyHash, Sequence};
use test_utils::{assert_hex_eq, from_hex, keys, transactions, utxo};

fn key(wif: &str, network: Network) -> PrivateKey {
    let key = PrivateKey::from_wif(wif).unwrap();
    PrivateKey::new(key.inner, network)
}

fn coin(vout: u32, script: &[u8], wif: &str, network: Network) -> UnspentOutput {
    UnspentOutput::new(utxo::TXID, vout, script, utxo::VALUE, key(wif, network)).unwrap()
}

fn pay(address: &str, value: u64, network: Network) -> PaymentOutput {
    PaymentOutput::new(address, value, network).unwrap()
}

#[test]
fn btc_legacy() {
    let network = Network::Bitcoin;
    let built = TransactionBuilder::new(network)
        .spend_from_with_sequence(
            coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .pay_to(pay("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", 90_000, network))
        .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(built.to_hex(), transactions::BTC_LEGACY);
    assert_eq!(built.size(), 225);
    assert_eq!(built.txid.to_string(), transactions::BTC_LEGACY_TXID);
    assert_eq!(built.change, 8_500);
    assert!(!built.transaction.has_witness());
}

#[test]
fn btc_segwit() {
    let network = Network::Bitcoin;
    let lock = from_hex(&format!("0014{}", keys::M0_PKH));
    let built = TransactionBuilder::new(network)
        .spend_from_with_sequence(coin(0, &lock, keys::M0_WIF, network), Sequence::MAX)
        .unwrap()
        .pay_to(pay("bc1qjfswr2pvpuu52j0t9a98n7w3tnjcd49t7a9te7", 90_000, network))
        .change_to("bc1qw4a0dpdewdkllfej092wvreczj8shmw4nq64aq")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(built.to_hex(), transactions::BTC_SEGWIT);
    assert_eq!(built.size(), 223);
    assert_eq!(built.txid.to_string(), transactions::BTC_SEGWIT_TXID);
    assert!(built.transaction.has_witness());
    assert_eq!(built.transaction.input[0].witness.len(), 2);
    assert!(built.transaction.input[0].script_sig.is_empty());
}

#[test]
fn btc_mixed_inputs() {
    let network = Network::Bitcoin;
    let m12 = key(keys::M12_WIF, network);
    let nested_lock = Address::p2shwpkh(m12.pubkey_hash(), network).unwrap().script_pubkey();

    let built = TransactionBuilder::new(network)
        .spend_from_with_sequence(
            coin(0, &from_hex(&format!("76a914{}88ac", keys::M0_PKH)), keys::M0_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .spend_from_with_sequence(coin(1, nested_lock.as_bytes(), keys::M12_WIF, network), Sequence::MAX)
        .unwrap()
        .spend_from_with_sequence(
            coin(0, &from_hex(&format!("0014{}", keys::M42_PKH)), keys::M42_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .spend_from_with_sequence(
            coin(1, &from_hex(&format!("0014{}", keys::M1_PKH)), keys::M1_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .pay_to(pay("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn", 90_000, network))
        .pay_to(pay("19CVH9bUwpGL1EZnVUF52gMKTAgL9FA6Pi", 89_000, network))
        .pay_to(pay("35PBEaofpUeH8VnnNSorM1QZsadrZoQp4N", 100_000, network))
        .pay_to(pay("bc1qjfswr2pvpuu52j0t9a98n7w3tnjcd49t7a9te7", 80_000, network))
        .change_to("bc1qw4a0dpdewdkllfej092wvreczj8shmw4nq64aq")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(built.to_hex(), transactions::BTC_MIXED);
    assert_eq!(built.size(), 792);
    assert_eq!(built.txid.to_string(), transactions::BTC_MIXED_TXID);
    assert_eq!(built.change, 39_500);

    let tx = &built.transaction;
    // the P2PKH input signs in its script sig and carries an empty witness
    assert!(tx.input[0].witness.is_empty());
    assert_eq!(tx.input[1].script_sig.as_bytes(), from_hex(&format!("160014{}", keys::M12_PKH)));
    assert!(tx.input[2].script_sig.is_empty());
    assert!(tx.input[3..].iter().all(|input| input.witness.len() == 2));
}

#[test]
fn ltc_segwit() {
    let network = Network::Litecoin;
    let lock = from_hex(&format!("0014{}", keys::M0_PKH));
    let built = TransactionBuilder::new(network)
        .spend_from(coin(0, &lock, keys::M0_WIF, network))
        .unwrap()
        .pay_to(pay("ltc1qjfswr2pvpuu52j0t9a98n7w3tnjcd49t6pl0pw", 90_000, network))
        .change_to("ltc1qjfswr2pvpuu52j0t9a98n7w3tnjcd49t6pl0pw")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(built.to_hex(), transactions::LTC_SEGWIT);
    assert_eq!(built.size(), 223);
    assert_eq!(built.txid.to_string(), transactions::LTC_SEGWIT_TXID);
    assert_eq!(built.transaction.input[0].sequence, Sequence::ZERO);
}

#[test]
fn ltc_legacy() {
    let network = Network::Litecoin;
    let built = TransactionBuilder::new(network)
        .spend_from(coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network))
        .unwrap()
        .pay_to(pay("LZtrWDgnE8XFmwDvg9FnKiFc2R6AE8uZXp", 90_000, network))
        .change_to("LZtrWDgnE8XFmwDvg9FnKiFc2R6AE8uZXp")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_hex_eq!(built.raw, transactions::LTC_LEGACY);
    assert_eq!(built.size(), 226);
    assert_eq!(built.txid.to_string(), transactions::LTC_LEGACY_TXID);
}

#[test]
fn doge_legacy() {
    let network = Network::Dogecoin;
    let built = TransactionBuilder::new(network)
        .spend_from_with_sequence(
            coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .pay_to(pay("DFrGuKX2dKj9ru9GqUwY83Hcps3oUczDUV", 90_000, network))
        .change_to("D95tAajqBYDHDh1imeJXENgTH4qemHy7H4")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(built.to_hex(), transactions::DOGE_LEGACY);
    assert_eq!(built.size(), 225);
    assert_eq!(built.txid.to_string(), transactions::DOGE_LEGACY_TXID);
}

#[test]
fn bch_fork_id() {
    let network = Network::BitcoinCash;
    let builder = TransactionBuilder::new(network)
        .spend_from_with_sequence(
            coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .pay_to(pay("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", 9_000, network))
        .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap();
    let built = builder.build().unwrap();

    assert_eq!(built.to_hex(), transactions::BCH_FORK);
    assert_eq!(built.size(), 226);
    assert_eq!(hex::encode(built.txid.to_byte_array()), transactions::BCH_FORK_HASH);

    // the outpoint goes on the wire in display order
    assert_eq!(&built.raw[5..37], &from_hex(utxo::TXID)[..]);

    // CashAddr destinations resolve to the same scripts
    let cashaddr = TransactionBuilder::new(network)
        .spend_from_with_sequence(
            coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network),
            Sequence::MAX,
        )
        .unwrap()
        .pay_to(pay(
            &Address::p2pkh(PubkeyHash::from_byte_array(from_hex(keys::M0_PKH).try_into().unwrap()), network)
                .to_cashaddr()
                .unwrap(),
            9_000,
            network,
        ))
        .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
        .unwrap()
        .set_fee(utxo::FEE)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(cashaddr, built);
}

#[test]
fn fork_dialect_diverges_from_legacy() {
    let build = |network: Network| {
        TransactionBuilder::new(network)
            .spend_from_with_sequence(
                coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network),
                Sequence::MAX,
            )
            .unwrap()
            .pay_to(pay("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", 9_000, network))
            .change_to("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn")
            .unwrap()
            .set_fee(utxo::FEE)
            .unwrap()
            .build()
            .unwrap()
    };
    let legacy = build(Network::Bitcoin);
    let fork = build(Network::BitcoinCash);

    let legacy_sig = legacy.transaction.input[0].script_sig.as_bytes();
    let fork_sig = fork.transaction.input[0].script_sig.as_bytes();
    assert_ne!(legacy_sig, fork_sig);
    // both are a DER signature plus flag, then the 33 byte key
    for script_sig in [legacy_sig, fork_sig] {
        let len = script_sig[0] as usize;
        assert!((70..=73).contains(&len));
        assert_eq!(script_sig[1], 0x30);
        assert_eq!(&script_sig[len + 1..], &from_hex(&format!("21{}", keys::M0_PUBKEY))[..]);
    }
    assert_eq!(legacy_sig[legacy_sig[0] as usize], 0x01);
    assert_eq!(fork_sig[fork_sig[0] as usize], 0x41);
}

#[test]
fn insufficient_funds_never_underflows() {
    let network = Network::Bitcoin;
    let result = TransactionBuilder::new(network)
        .spend_from(coin(0, &from_hex(utxo::P2PKH_LOCK), keys::M0_WIF, network))
        .unwrap()
        .pay_to(pay("1ELyiT6djUqaHqQKpVA48Yw3EoMnS7QD8w", 90_000, network))
        .pay_to(pay("1BiBN4aPKupsKtxg6twyaH81wjKW8FKCDn", 10_000, network))
        .set_fee(1)
        .unwrap()
        .build();
    assert_eq!(
        result,
        Err(BuilderError::InsufficientFunds {
            available: 100_000,
            required: 100_001,
        })
    );
}
