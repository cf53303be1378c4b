//! Key material and known-answer vectors.
//!
//! The merchant and gateway key pairs are fixed 1024-bit keys generated with
//! OpenSSL. The reference signature and ciphertext were produced with the
//! OpenSSL command line from the same keys.

use std::sync::OnceLock;

use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::clock::FixedClock;
use crate::config::PayPayConfig;
use crate::crypto::{parse_private_key, parse_public_key, Cipher, Signer};

/// Partner id used throughout the tests.
pub const TEST_PARTNER_ID: &str = "200001";

/// 2024-01-01T00:00:00.000Z in Unix milliseconds.
pub const TEST_EPOCH_MILLIS: i64 = 1_704_067_200_000;

/// Merchant private key, PKCS#8.
pub const MERCHANT_PRIVATE_PEM: &str = include_str!("../../tests/fixtures/merchant_private.pem");
/// Merchant private key, PKCS#1.
pub const MERCHANT_PRIVATE_PKCS1_PEM: &str =
    include_str!("../../tests/fixtures/merchant_private_pkcs1.pem");
/// Merchant public key, SPKI.
pub const MERCHANT_PUBLIC_PEM: &str = include_str!("../../tests/fixtures/merchant_public.pem");
/// Merchant public key, PKCS#1.
pub const MERCHANT_PUBLIC_PKCS1_PEM: &str =
    include_str!("../../tests/fixtures/merchant_public_pkcs1.pem");
/// Gateway private key, PKCS#8.
pub const GATEWAY_PRIVATE_PEM: &str = include_str!("../../tests/fixtures/gateway_private.pem");
/// Gateway public key, SPKI.
pub const GATEWAY_PUBLIC_PEM: &str = include_str!("../../tests/fixtures/gateway_public.pem");

/// Canonical string of a query envelope with `biz_content = "abc"`.
pub const KNOWN_CANONICAL_STRING: &str = "biz_content=abc&charset=UTF-8&format=JSON&language=pt&partner_id=200001&request_no=query_1704067200000&service=alipay.trade.query&timestamp=2024-01-01T00:00:00.000Z&version=1.0";

/// `openssl dgst -sha1 -sign merchant_private.pem` over [`KNOWN_CANONICAL_STRING`].
pub const KNOWN_SIGNATURE: &str = "PGf3MMHnlNwR+uCsPWCW//iyTtSMiD5YTzuYB0MXR17FlXBEKKNQas1nmmIIdWYMCae9cuwcEMvM1ehLYSZVgT/n0dQY4jDIcx9U0rrr9gyy4hsGUWylMtZVVFwmPH7dwpp4mqazvSfxhhJ/eSUQ19b94otjJz67mXHyAdkvGHc=";

/// `openssl pkeyutl -encrypt -pkeyopt rsa_padding_mode:pkcs1` of
/// `{"out_trade_no":"PAY_1","total_amount":"1000"}` under the merchant public key.
pub const OPENSSL_CIPHERTEXT: &str = "BVpN3UUISgL55rSHFdUrUU53bwdadUWKCy2wxWjM2Dy1NvZveqDV41LpZrYc7RcYL5K2aBy7LXVeHSLsUkfwfeHjFbi/OzJ0IJNeGBdfIPOYUNx+DJskrw4ZgmtSXx8MiV+FAAyVuBShlIxGRRYb64u1KZ1B4bqwXMN5PgY6t+4=";

fn cached_private(cell: &'static OnceLock<RsaPrivateKey>, pem: &str) -> RsaPrivateKey {
    cell.get_or_init(|| parse_private_key(pem).expect("fixture private key parses"))
        .clone()
}

fn cached_public(cell: &'static OnceLock<RsaPublicKey>, pem: &str) -> RsaPublicKey {
    cell.get_or_init(|| parse_public_key(pem).expect("fixture public key parses"))
        .clone()
}

/// Parsed merchant private key.
pub fn merchant_private_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    cached_private(&KEY, MERCHANT_PRIVATE_PEM)
}

/// Parsed merchant public key.
pub fn merchant_public_key() -> RsaPublicKey {
    static KEY: OnceLock<RsaPublicKey> = OnceLock::new();
    cached_public(&KEY, MERCHANT_PUBLIC_PEM)
}

/// Parsed gateway private key.
pub fn gateway_private_key() -> RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    cached_private(&KEY, GATEWAY_PRIVATE_PEM)
}

/// Parsed gateway public key.
pub fn gateway_public_key() -> RsaPublicKey {
    static KEY: OnceLock<RsaPublicKey> = OnceLock::new();
    cached_public(&KEY, GATEWAY_PUBLIC_PEM)
}

/// Merchant-side signer: signs with the merchant key, verifies the gateway.
pub fn merchant_signer() -> Signer {
    Signer::new(merchant_private_key(), gateway_public_key())
}

/// Merchant-side cipher: encrypts for the gateway, decrypts its replies.
pub fn merchant_cipher() -> Cipher {
    Cipher::new(merchant_private_key(), gateway_public_key())
}

/// Gateway-side signer: signs with the gateway key, verifies the merchant.
pub fn gateway_signer() -> Signer {
    Signer::new(gateway_private_key(), merchant_public_key())
}

/// Gateway-side cipher: encrypts for the merchant, decrypts its requests.
pub fn gateway_cipher() -> Cipher {
    Cipher::new(gateway_private_key(), merchant_public_key())
}

/// A valid merchant configuration.
pub fn test_config() -> PayPayConfig {
    PayPayConfig::new(TEST_PARTNER_ID, MERCHANT_PRIVATE_PEM, GATEWAY_PUBLIC_PEM)
}

/// Clock frozen at [`TEST_EPOCH_MILLIS`].
pub fn test_clock() -> FixedClock {
    FixedClock::from_millis(TEST_EPOCH_MILLIS)
}
