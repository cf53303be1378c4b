//! RSA key material parsing and serialization.
//!
//! Gateway dashboards hand out keys in several shapes. All of these are
//! accepted for both private and public keys:
//!
//! - PKCS#8 / SPKI PEM (`BEGIN PRIVATE KEY`, `BEGIN PUBLIC KEY`)
//! - PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`, `BEGIN RSA PUBLIC KEY`)
//! - the bare base64 body of either, without armor lines
//!
//! Indentation and CRLF line endings inside PEM armor are tolerated.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use super::{CryptoError, CryptoResult};

const PEM_BEGIN: &str = "-----BEGIN";

/// Parse an RSA private key from PEM or bare base64 DER.
pub fn parse_private_key(input: &str) -> CryptoResult<RsaPrivateKey> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CryptoError::InvalidPrivateKey("key is empty".to_string()));
    }

    if input.contains(PEM_BEGIN) {
        let pem = normalize_pem(input);
        return RsaPrivateKey::from_pkcs8_pem(&pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&pem))
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()));
    }

    let der = decode_bare(input).map_err(CryptoError::InvalidPrivateKey)?;
    RsaPrivateKey::from_pkcs8_der(&der)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(&der))
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))
}

/// Parse an RSA public key from PEM or bare base64 DER.
pub fn parse_public_key(input: &str) -> CryptoResult<RsaPublicKey> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CryptoError::InvalidPublicKey("key is empty".to_string()));
    }

    if input.contains(PEM_BEGIN) {
        let pem = normalize_pem(input);
        return RsaPublicKey::from_public_key_pem(&pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(&pem))
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()));
    }

    let der = decode_bare(input).map_err(CryptoError::InvalidPublicKey)?;
    RsaPublicKey::from_public_key_der(&der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Serialize a private key as PKCS#8 PEM.
pub fn private_key_to_pem(key: &RsaPrivateKey) -> CryptoResult<Zeroizing<String>> {
    let pem = key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    Ok(Zeroizing::new(String::from(pem.as_str())))
}

/// Serialize a public key as SPKI PEM.
pub fn public_key_to_pem(key: &RsaPublicKey) -> CryptoResult<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Strip per-line indentation and carriage returns from PEM armor.
fn normalize_pem(input: &str) -> Zeroizing<String> {
    let mut pem = Zeroizing::new(String::with_capacity(input.len()));
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        pem.push_str(line);
        pem.push('\n');
    }
    pem
}

fn decode_bare(input: &str) -> Result<Zeroizing<Vec<u8>>, String> {
    let compact: Zeroizing<String> =
        Zeroizing::new(input.chars().filter(|c| !c.is_whitespace()).collect());
    STANDARD
        .decode(compact.as_bytes())
        .map(Zeroizing::new)
        .map_err(|e| format!("not PEM and not base64 DER: {}", e))
}
