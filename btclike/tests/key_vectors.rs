//! WIF import and address rendering across chains.

use btclike::address::Error as AddressError;
use btclike::crypto::key::Error as KeyError;
use btclike::{Address, Network, PrivateKey, ScriptType};
use test_utils::assert_error_contains;

#[test]
fn wif_to_address() {
    let vectors = [
        ("L2djKztH4YYotB8co59cyC8oY5cn8NE2TBS2HewxbD6mbYZ8CnYs", Network::Bitcoin, "1Ff7U7nbofhZzENXdHG6YJT7ngLUnPeSu6"),
        ("L3p2gv4xFh4cJfyvdSJxCEjhRz3sR1kzPZMQ2suSzHakXFQXnK72", Network::Bitcoin, "1Hh224cwL9TSykhw1TQ6NrYz8nb3HXKwDa"),
        ("T9wNQKWTJx4s5chwKwCyUYJVtcDRJCeenj7M49vxJYgwXEMkox8S", Network::Litecoin, "La9MhhHbKsRi8YCDVsNzm3huPvwoidbEGb"),
        ("QPPfPfcTBqVz6ZRY4DmPu27Cj865tqSPz4TMEFNyWJ3iQpZngDCX", Network::Dogecoin, "DFNWYyRv6w8ZGerbt7yKmqcr9DKFzyn57s"),
    ];
    for (wif, network, expected) in vectors {
        let key = PrivateKey::from_wif(wif).unwrap();
        assert_eq!(key.network, network);
        assert_eq!(key.to_wif(), wif);
        let address = Address::from_private_key(&key, ScriptType::P2pkh).unwrap();
        assert_eq!(address.to_string(), expected);
        assert_eq!(Address::from_str_with_network(expected, network).unwrap(), address);
    }
}

#[test]
fn bitcoin_cash_wif_to_cashaddr() {
    let vectors = [
        (
            "L4ZvxKpyRcCxBXfNm7VGPowKjM9N5kNZniunuNfWeCcePzi3e82L",
            "bitcoincash:qqgr780jzqqnq2ka5g823spxp7k24dptmux77sznat",
        ),
        (
            "L2zENewWgSLgJBQCxsiozvTxxSnXscegaL3NUKHWwoMSbqGWnp6m",
            "bitcoincash:qr9ll8nzx5w9srg40vzqdp2yuu30lngsvypccnul9a",
        ),
    ];
    for (wif, expected) in vectors {
        // BCH shares the bitcoin WIF version, the chain has to be pinned
        let key = PrivateKey::from_wif_with_network(wif, Network::BitcoinCash).unwrap();
        let address = Address::from_private_key(&key, ScriptType::P2pkh).unwrap();
        assert_eq!(address.to_cashaddr().as_deref(), Some(expected));
        assert_eq!(Address::from_str_with_network(expected, Network::BitcoinCash).unwrap(), address);
        assert_eq!(
            Address::from_private_key(&key, ScriptType::P2wpkh),
            Err(AddressError::SegwitUnsupported { network: Network::BitcoinCash })
        );
    }
}

#[test]
fn segwit_addresses_from_keys() {
    let key = PrivateKey::from_wif("Kwt23fBBZB8jG4obxg9LqnpZZZEjKYvCqDSkrvjDKWfhU7WXczmV").unwrap();
    assert_eq!(
        Address::from_private_key(&key, ScriptType::P2wpkh).unwrap().to_string(),
        "bc1qw4a0dpdewdkllfej092wvreczj8shmw4nq64aq"
    );
    let ltc = PrivateKey::new(key.inner, Network::Litecoin);
    assert_eq!(
        Address::from_private_key(&ltc, ScriptType::P2wpkh).unwrap().to_string(),
        "ltc1qw4a0dpdewdkllfej092wvreczj8shmw4huq39s"
    );
}

#[test]
fn error_messages_carry_context() {
    assert_error_contains!(
        PrivateKey::from_wif_with_network(
            "KyDGxaAvG1hbc4DkyDbfyQzu2eUCBNFgoPEByV9M68kGH5QzSL34",
            Network::Dogecoin
        ),
        "expected 0x9e, got 0x80"
    );
    assert_error_contains!(
        Address::from_str_with_network("DFNWYyRv6w8ZGerbt7yKmqcr9DKFzyn57s", Network::Bitcoin),
        "wrong address prefix 30"
    );
    assert!(matches!(PrivateKey::from_wif("not a key"), Err(KeyError::Base58(_))));
}
