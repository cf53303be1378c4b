//! Business content encryption (RSA PKCS#1 v1.5).
//!
//! The JSON business payload travels as base64 ciphertext inside the signed
//! envelope, so intermediaries only see the outer metadata.
//!
//! # Wire Format
//!
//! ```text
//! base64( RSA(block_1) || RSA(block_2) || ... )
//! ```
//!
//! Plaintext is split into blocks of at most `k - 11` bytes, where `k` is the
//! modulus size in bytes. Each ciphertext block is exactly `k` bytes. Payloads
//! that fit in one block produce a single ciphertext block.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{CryptoError, CryptoResult};

/// PKCS#1 v1.5 encryption padding overhead in bytes.
const PKCS1_PADDING_OVERHEAD: usize = 11;

/// Serialize `content` to compact JSON and encrypt it, returning base64.
pub fn encrypt<T: Serialize + ?Sized>(
    content: &T,
    public_key: &RsaPublicKey,
) -> CryptoResult<String> {
    let plaintext =
        serde_json::to_vec(content).map_err(|e| CryptoError::Encryption(e.to_string()))?;
    encrypt_bytes(&plaintext, public_key)
}

/// Encrypt raw bytes, returning base64.
pub fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> CryptoResult<String> {
    let key_size = public_key.size();
    let block_size = key_size
        .checked_sub(PKCS1_PADDING_OVERHEAD)
        .filter(|size| *size > 0)
        .ok_or_else(|| CryptoError::Encryption(format!("key too small: {} bytes", key_size)))?;

    let mut rng = rand::thread_rng();
    let block_count = plaintext.len().div_ceil(block_size).max(1);
    let mut ciphertext = Vec::with_capacity(block_count * key_size);

    if plaintext.is_empty() {
        let block = public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        ciphertext.extend_from_slice(&block);
    }
    for chunk in plaintext.chunks(block_size) {
        let block = public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, chunk)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        ciphertext.extend_from_slice(&block);
    }

    Ok(STANDARD.encode(ciphertext))
}

/// Decode and decrypt base64 ciphertext into raw bytes.
pub fn decrypt_bytes(encoded: &str, private_key: &RsaPrivateKey) -> CryptoResult<Vec<u8>> {
    let ciphertext = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?;

    let key_size = private_key.size();
    if ciphertext.is_empty() || ciphertext.len() % key_size != 0 {
        return Err(CryptoError::InvalidEncoding(format!(
            "ciphertext length {} is not a multiple of the {}-byte key size",
            ciphertext.len(),
            key_size
        )));
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for block in ciphertext.chunks(key_size) {
        let decrypted = private_key
            .decrypt(Pkcs1v15Encrypt, block)
            .map_err(|e| CryptoError::DecryptFailed(e.to_string()))?;
        plaintext.extend_from_slice(&decrypted);
    }
    Ok(plaintext)
}

/// Decrypt base64 ciphertext and parse it as JSON.
pub fn decrypt(encoded: &str, private_key: &RsaPrivateKey) -> CryptoResult<Value> {
    decrypt_as(encoded, private_key)
}

/// Decrypt base64 ciphertext and deserialize it into `T`.
pub fn decrypt_as<T: DeserializeOwned>(
    encoded: &str,
    private_key: &RsaPrivateKey,
) -> CryptoResult<T> {
    let plaintext = decrypt_bytes(encoded, private_key)?;
    serde_json::from_slice(&plaintext).map_err(|e| CryptoError::InvalidPayload(e.to_string()))
}

/// Encrypts outbound business content and decrypts inbound content.
///
/// Holds the gateway public key for encryption and the merchant private key
/// for decryption.
#[derive(Clone)]
pub struct Cipher {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl Cipher {
    /// Create a cipher from parsed keys.
    pub fn new(private_key: RsaPrivateKey, public_key: RsaPublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    /// Encrypt `content` for the gateway.
    pub fn encrypt<T: Serialize + ?Sized>(&self, content: &T) -> CryptoResult<String> {
        encrypt(content, &self.public_key)
    }

    /// Decrypt content addressed to the merchant.
    pub fn decrypt(&self, encoded: &str) -> CryptoResult<Value> {
        decrypt(encoded, &self.private_key)
    }

    /// Decrypt content addressed to the merchant into `T`.
    pub fn decrypt_as<T: DeserializeOwned>(&self, encoded: &str) -> CryptoResult<T> {
        decrypt_as(encoded, &self.private_key)
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
