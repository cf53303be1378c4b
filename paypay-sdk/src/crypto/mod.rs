//! Request signing and business-content encryption.
//!
//! The gateway protocol rests on two primitives, both pure functions of
//! their input and the configured RSA keys:
//!
//! - [`signer`]: canonical parameter string + SHA1withRSA signatures
//! - [`cipher`]: RSA PKCS#1 v1.5 encryption of the JSON business content
//!
//! Key material is parsed by [`keys`], which accepts PKCS#8, PKCS#1 and bare
//! base64 DER encodings.
//!
//! # Key roles
//!
//! The merchant private key signs outbound requests and decrypts inbound
//! business content. The gateway public key verifies inbound signatures and
//! encrypts outbound business content.

pub mod cipher;
pub mod keys;
pub mod signer;

pub use cipher::Cipher;
pub use keys::{parse_private_key, parse_public_key, private_key_to_pem, public_key_to_pem};
pub use signer::{canonicalize, Signer, SIGN_KEY, SIGN_TYPE_KEY, SIGN_TYPE_RSA};

/// Low-level crypto error types.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("Signing failed: {0}")]
    Signing(String),
    #[error("Encryption failed: {0}")]
    Encryption(String),
    #[error("Invalid ciphertext encoding: {0}")]
    InvalidEncoding(String),
    #[error("Decryption failed: {0}")]
    DecryptFailed(String),
    #[error("Decrypted content is not valid JSON: {0}")]
    InvalidPayload(String),
}

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
