//! Common test fixtures and constants

/// Seed the transaction vectors derive their keys from, as hex.
pub const TX_SEED: &str = "c4eb38a2e9a353c180e8e74c474e9192633f81afdbaa49d0c6207def597dafc1";

/// BIP32 test vector 1 seed.
pub const BIP32_VECTOR_1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

/// 64 byte seed used for the BIP44/BIP84 path tests.
pub const PATH_SEED: &str = "3929e068896221bd59b37cc5cac18982862e155381cba62d03513712e9286396a27da9d965d6123eb16b4eef82c4ddcdfd748898b71841bb7342a3c255ca0f58";

/// Mnemonic whose BIP39 seed (empty passphrase) is [`MNEMONIC_SEED`].
pub const MNEMONIC: &str =
    "bunker ring viable sphere trap flush cost motor mixture transfer copy motor resist prize speed";

/// BIP39 seed of [`MNEMONIC`].
pub const MNEMONIC_SEED: &str = "fa4c8ee9e984db8752cd266972c13af5d077c6e5d100eb57a7801f7bc7cb35cc54d4bd723700d6b1276959f9ace1d5c6512932d39c6e235dc7c748f7af38de2e";

/// Keys derived from [`TX_SEED`] at `m/<index>`, as Bitcoin WIF.
pub mod keys {
    /// `m/0`.
    pub const M0_WIF: &str = "KyDGxaAvG1hbc4DkyDbfyQzu2eUCBNFgoPEByV9M68kGH5QzSL34";
    /// `m/0` compressed public key.
    pub const M0_PUBKEY: &str =
        "034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1";
    /// `m/0` public key hash.
    pub const M0_PKH: &str = "9260e1a82c0f394549eb2f4a79f9d15ce586d4ab";
    /// `m/1`.
    pub const M1_WIF: &str = "Kwt23fBBZB8jG4obxg9LqnpZZZEjKYvCqDSkrvjDKWfhU7WXczmV";
    /// `m/1` public key hash.
    pub const M1_PKH: &str = "757af685b9736dffa7327954e60f38148f0bedd5";
    /// `m/12`.
    pub const M12_WIF: &str = "L3T6BEeYJRegkMqkzTTe2XbjFu91kNFMV7TLtTSFQrDYCfx6W9Fz";
    /// `m/12` public key hash.
    pub const M12_PKH: &str = "7305fb6d23d9f629410f36572ed870b860926565";
    /// `m/42`.
    pub const M42_WIF: &str = "L12PcgnuQa2ZCvDG7AyyTA5hps5MtiNTuyts3QdVqqShmjk3m9sK";
    /// `m/42` public key hash.
    pub const M42_PKH: &str = "790de5115f0f1bf427d08c2d7968a22bbaab3a61";
}

/// The coin every transaction vector spends from.
pub mod utxo {
    /// Id of the funding transaction, display order.
    pub const TXID: &str = "8b328a4768f6f168799a8509e4541d7bc64e632509143c5e27328029680b6786";
    /// P2PKH lock of the legacy vectors.
    pub const P2PKH_LOCK: &str = "76a9143f6d330ab1274be7ee7ec75a387e819874c6f9c688ac";
    /// Value of the funding output.
    pub const VALUE: u64 = 100_000;
    /// Fee paid by every vector.
    pub const FEE: i64 = 1_500;
}

/// Signed transactions, hex encoded, with their ids.
pub mod transactions {
    /// Bitcoin, one P2PKH input.
    pub const BTC_LEGACY: &str = "010000000186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b000000006a47304402205c29c61e6720abd40aa7cf2b02841767752ce2641e6fb4d036535c3b0963f06802203b6af55f51c721a2a169ed234bc8c173f66a84d487238334f7da36a5e26bc7cb0121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1ffffffff02905f0100000000001976a9149260e1a82c0f394549eb2f4a79f9d15ce586d4ab88ac34210000000000001976a914757af685b9736dffa7327954e60f38148f0bedd588ac00000000";
    /// Id of [`BTC_LEGACY`].
    pub const BTC_LEGACY_TXID: &str =
        "2db796f6a11825bfdad246be11bd96fb192b149621cbf53f3b8bf8a32e38aa14";

    /// Bitcoin, one P2WPKH input.
    pub const BTC_SEGWIT: &str = "0100000000010186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b0000000000ffffffff02905f0100000000001600149260e1a82c0f394549eb2f4a79f9d15ce586d4ab3421000000000000160014757af685b9736dffa7327954e60f38148f0bedd50248304502210097d255ce4b0aa892d64f227179fe78fd6bb8841afbc60ee4a655ea895cdb4d9a022061d33d06edfea57488229b4118c1a3fa20b02010393fbb81211d5db3887758d40121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b100000000";
    /// Id of [`BTC_SEGWIT`].
    pub const BTC_SEGWIT_TXID: &str =
        "54d415fc4a34e7ef008fc50e19b871fcfd27a0e3fd8d69cb161658f69a65bd8c";

    /// Bitcoin, P2PKH, P2SH-P2WPKH and two P2WPKH inputs.
    pub const BTC_MIXED: &str = "0100000000010486670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b000000006b483045022100d02783b879bb5cd827b30467f7da137eada8cbf54d920c6b5e58ba9bf9cad46b02207e62c43b0ed537d216db5f206261255c6e497719f283e2a9106f2ef51300ad710121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1ffffffff86670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b01000000171600147305fb6d23d9f629410f36572ed870b860926565ffffffff86670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b0000000000ffffffff86670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b0100000000ffffffff05905f0100000000001976a914757af685b9736dffa7327954e60f38148f0bedd588aca85b0100000000001976a91459ed2ffeec6fc9d9b28317eee5c7772d9bbd2b3c88aca08601000000000017a9142880c9ccd39581ea618053a558485452e8d1b80b8780380100000000001600149260e1a82c0f394549eb2f4a79f9d15ce586d4ab4c9a000000000000160014757af685b9736dffa7327954e60f38148f0bedd50002483045022100ba48a1ea0353031a4d790da18a4a578455b1cc2818784e4895c38b98af89635f022027390cd8f3c19d77b754cd823f35dbde104d6ce7a36dd4266618326381f76e050121035bcb3ba01d8a5ac55d5f2927b08455852602138d37a784cb4daa7c36415678d6024730440220387ac6adee4278ce41273041164ebcc2e3fe247f0223b5e9253381d0535e3f6a02204f5289749b5490318df32de8237ff50b3c0d9d93e7c63c41a9f9869bc4451aaa012102bcaae8b85a493fcfa88cd4e23dcea0bb3f2b879be97cb92249d759e7066aa8ea02483045022100b4f7095b7f5fca3f12bd530caf1cf184f1f0b9cc9f429bb68bbee297593c35a102204420e98c639c621365776c54a126a0e6c3d5ed480eee281afc9b298f44f1b7bf01210215f9081aede9321256eefed4ab2db5d264bf45a8e358ceaa570015ec51b2779700000000";
    /// Id of [`BTC_MIXED`].
    pub const BTC_MIXED_TXID: &str =
        "bbd3d4b635f3e38c057a76a3ab716826ee6082b476dcf5aeedea6869f3fcf211";

    /// Litecoin, one P2WPKH input.
    pub const LTC_SEGWIT: &str = "0100000000010186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b00000000000000000002905f0100000000001600149260e1a82c0f394549eb2f4a79f9d15ce586d4ab34210000000000001600149260e1a82c0f394549eb2f4a79f9d15ce586d4ab02483045022100c0ed097f4c83919abb152bd10af8938afd6c74bed6931bf1125718696dc3a599022078cdc4dabd9e8ba0fc2fb6d481f2903bb99d63203f5d511046bf222db4b8a1c20121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b100000000";
    /// Id of [`LTC_SEGWIT`].
    pub const LTC_SEGWIT_TXID: &str =
        "df5e1a23108a4a66927ff0c307a4040bb5873a21c4c8b2f8ab80d078cc008416";

    /// Litecoin, one P2PKH input.
    pub const LTC_LEGACY: &str = "010000000186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b000000006b483045022100a01817075b9f0d7ad9b53ade48afa56585973f3638bc7fb0383b91fed890c0bb022049856e26c2f4493f74ac034f75efea268b03fa79ca7d1f560427df29b0e271d40121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b10000000002905f0100000000001976a914a0ed2d308d96d3e4d48fd651cea897672cb00c9a88ac34210000000000001976a914a0ed2d308d96d3e4d48fd651cea897672cb00c9a88ac00000000";
    /// Id of [`LTC_LEGACY`].
    pub const LTC_LEGACY_TXID: &str =
        "8b692d0cb1bd57533b613c689a0f654697d7929114c1c5a6ce96590b9b53b3f7";

    /// Dogecoin, one P2PKH input.
    pub const DOGE_LEGACY: &str = "010000000186670b68298032275e3c140925634ec67b1d54e409859a7968f1f668478a328b000000006a47304402202dbee3758a617d91e90bba63a96d8bc076c96d5d18b20a2a1b19ee66b73b3db702203e80b80601250ba8fdcd90f4ba7456c7f5f92e1ba1f6ce9fe1fe3e0867045c8f0121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1ffffffff02905f0100000000001976a914757af685b9736dffa7327954e60f38148f0bedd588ac34210000000000001976a9142b44ed1a87de1de2e55f938f68b7b7ea56ab2d7e88ac00000000";
    /// Id of [`DOGE_LEGACY`].
    pub const DOGE_LEGACY_TXID: &str =
        "be8bd61419aac9d2e664cfac711fba4e992c87a14191de416633acecb61731a3";

    /// Bitcoin Cash, one P2PKH input signed with the fork id preimage.
    pub const BCH_FORK: &str = "01000000018b328a4768f6f168799a8509e4541d7bc64e632509143c5e27328029680b6786000000006b483045022100cd1a3cb33b1d74a7a45c28d62ba3bda7988292259c096f0da38261121f109ab502203c7664eb076407e8b384e4f1329e5d2884d0cf4ebea413a726ce525b051e05f94121034ebb955a1cdd8685684ce5894fb3ebb971284bc181b512f5db2441e39f8721b1ffffffff0228230000000000001976a9149260e1a82c0f394549eb2f4a79f9d15ce586d4ab88ac9c5d0100000000001976a914757af685b9736dffa7327954e60f38148f0bedd588ac00000000";
    /// Double SHA256 of [`BCH_FORK`], in hash byte order rather than display order.
    pub const BCH_FORK_HASH: &str =
        "740a30123c51b0b45126b69d52bd730a6235673c15003970479a7cabb1a6f0c1";
}

/// Lower case hex of a byte buffer.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex fixture, panicking on malformed input.
pub fn from_hex(s: &str) -> Vec<u8> {
    hex::decode(s).unwrap_or_else(|e| panic!("invalid hex fixture {:?}: {}", s, e))
}
