//! Canonical parameter signing (SHA1withRSA).
//!
//! # Canonical form
//!
//! ```text
//! k1=v1&k2=v2&...&kn=vn
//! ```
//!
//! - `sign` and `sign_type` are excluded
//! - keys are sorted by raw byte order, no locale awareness
//! - values are concatenated literally, with no escaping
//! - strings render as-is, numbers and bools as their JSON text,
//!   nested objects and arrays as compact JSON
//! - `null` values are skipped, the same as absent optional fields
//!
//! Both sides must derive the same string from the same parameters, so any
//! change here breaks interoperability with the gateway.

use std::borrow::Cow;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde_json::Value;
use sha1::{Digest, Sha1};

use super::{CryptoError, CryptoResult};
use crate::ParameterSet;

/// Parameter carrying the base64 signature.
pub const SIGN_KEY: &str = "sign";

/// Parameter carrying the signature algorithm label.
pub const SIGN_TYPE_KEY: &str = "sign_type";

/// Signature algorithm label sent to the gateway.
pub const SIGN_TYPE_RSA: &str = "RSA";

/// Build the canonical signature input for a parameter set.
///
/// # Example
///
/// ```
/// use paypay_sdk::{crypto::canonicalize, ParameterSet};
///
/// let params = ParameterSet::new()
///     .with("version", "1.0")
///     .with("charset", "UTF-8")
///     .with("sign", "ignored")
///     .with("sign_type", "RSA");
///
/// assert_eq!(canonicalize(&params), "charset=UTF-8&version=1.0");
/// ```
pub fn canonicalize(params: &ParameterSet) -> String {
    let mut out = String::new();
    for (key, value) in params.iter() {
        if key == SIGN_KEY || key == SIGN_TYPE_KEY {
            continue;
        }
        let Some(rendered) = render_value(value) else {
            continue;
        };
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&rendered);
    }
    out
}

fn render_value(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Array(_) | Value::Object(_) => Some(Cow::Owned(value.to_string())),
    }
}

/// Sign the canonical form of `params`, returning base64.
pub fn sign(params: &ParameterSet, private_key: &RsaPrivateKey) -> CryptoResult<String> {
    let digest = Sha1::digest(canonicalize(params).as_bytes());
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    Ok(STANDARD.encode(signature))
}

/// Verify a base64 signature over the canonical form of `params`.
///
/// Returns `false` on any mismatch, including malformed base64.
pub fn verify(params: &ParameterSet, signature: &str, public_key: &RsaPublicKey) -> bool {
    let Ok(signature) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    let digest = Sha1::digest(canonicalize(params).as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
        .is_ok()
}

/// Signs outbound parameter sets and verifies inbound ones.
///
/// Holds the merchant private key for signing and the gateway public key for
/// verification.
#[derive(Clone)]
pub struct Signer {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl Signer {
    /// Create a signer from parsed keys.
    pub fn new(private_key: RsaPrivateKey, public_key: RsaPublicKey) -> Self {
        Self {
            private_key,
            public_key,
        }
    }

    /// Sign `params` with the merchant private key.
    pub fn sign(&self, params: &ParameterSet) -> CryptoResult<String> {
        sign(params, &self.private_key)
    }

    /// Sign `params` and attach `sign` and `sign_type`.
    pub fn sign_into(&self, params: &mut ParameterSet) -> CryptoResult<()> {
        let signature = self.sign(params)?;
        params.insert(SIGN_KEY, signature);
        params.insert(SIGN_TYPE_KEY, SIGN_TYPE_RSA);
        Ok(())
    }

    /// Verify `signature` over `params` with the gateway public key.
    pub fn verify(&self, params: &ParameterSet, signature: &str) -> bool {
        verify(params, signature, &self.public_key)
    }

    /// Verify using the `sign` field carried by `params` itself.
    ///
    /// Returns `false` when the field is absent or not a string.
    pub fn verify_embedded(&self, params: &ParameterSet) -> bool {
        match params.get_str(SIGN_KEY) {
            Some(signature) => self.verify(params, signature),
            None => false,
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}
