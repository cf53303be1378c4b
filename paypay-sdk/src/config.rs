//! Gateway client configuration.
//!
//! # Environment Variables
//!
//! [`PayPayConfig::from_env`] reads:
//!
//! - `PAYPAY_PARTNER_ID` - merchant partner identifier (required)
//! - `PAYPAY_PRIVATE_KEY` or `PAYPAY_PRIVATE_KEY_PATH` - merchant private key,
//!   inline or as a file path (required)
//! - `PAYPAY_PUBLIC_KEY` or `PAYPAY_PUBLIC_KEY_PATH` - gateway public key,
//!   inline or as a file path (required)
//! - `PAYPAY_BASE_URL` - gateway endpoint (optional)
//! - `PAYPAY_LANGUAGE` - response language (optional)
//! - `PAYPAY_TIMEOUT_SECS` - request timeout (optional)

use std::collections::HashMap;
use std::fmt;

use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{parse_private_key, parse_public_key};
use crate::operations::Service;
use crate::response::BizContentMode;
use crate::{PayPayError, Result};

/// Production gateway endpoint.
pub const DEFAULT_BASE_URL: &str = "https://gateway.paypayafrica.com/recv.do";

/// PEM text that is wiped from memory on drop and redacted from `Debug`.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretPem(String);

impl SecretPem {
    /// Wrap PEM text.
    pub fn new(pem: impl Into<String>) -> Self {
        Self(pem.into())
    }

    /// Expose the PEM text.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretPem(<redacted>)")
    }
}

/// Configuration for the PayPay gateway client.
///
/// Immutable once handed to a [`PayPayClient`](crate::PayPayClient).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PayPayConfig {
    /// Merchant partner identifier.
    pub partner_id: String,

    /// Merchant private key (PEM or bare base64 DER). Signs requests and
    /// decrypts inbound business content.
    pub private_key: SecretPem,

    /// Gateway public key (PEM or bare base64 DER). Verifies responses and
    /// encrypts outbound business content.
    pub public_key: String,

    /// Gateway endpoint URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Protocol version.
    #[serde(default = "default_version")]
    pub version: String,

    /// Request charset.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Response format.
    #[serde(default = "default_format")]
    pub format: String,

    /// Response language.
    #[serde(default = "default_language")]
    pub language: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How response `biz_content` is interpreted unless overridden per service.
    #[serde(default)]
    pub biz_content_mode: BizContentMode,

    /// Per-service overrides for `biz_content_mode`.
    #[serde(default)]
    pub service_biz_content_modes: HashMap<Service, BizContentMode>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

fn default_format() -> String {
    "JSON".to_string()
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl PayPayConfig {
    /// Create a configuration with default endpoint and protocol settings.
    pub fn new(
        partner_id: impl Into<String>,
        private_key_pem: impl Into<String>,
        public_key_pem: impl Into<String>,
    ) -> Self {
        Self {
            partner_id: partner_id.into(),
            private_key: SecretPem::new(private_key_pem),
            public_key: public_key_pem.into(),
            base_url: default_base_url(),
            version: default_version(),
            charset: default_charset(),
            format: default_format(),
            language: default_language(),
            timeout_secs: default_timeout(),
            biz_content_mode: BizContentMode::default(),
            service_biz_content_modes: HashMap::new(),
        }
    }

    /// Set the gateway endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the protocol version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the charset.
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the response format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the response language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the default response `biz_content` mode.
    pub fn with_biz_content_mode(mut self, mode: BizContentMode) -> Self {
        self.biz_content_mode = mode;
        self
    }

    /// Override the response `biz_content` mode for one service.
    pub fn with_service_biz_content_mode(mut self, service: Service, mode: BizContentMode) -> Self {
        self.service_biz_content_modes.insert(service, mode);
        self
    }

    /// Response `biz_content` mode in effect for `service`.
    pub fn biz_content_mode_for(&self, service: Service) -> BizContentMode {
        self.service_biz_content_modes
            .get(&service)
            .copied()
            .unwrap_or(self.biz_content_mode)
    }

    /// Load configuration from `PAYPAY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let partner_id = lookup("PAYPAY_PARTNER_ID").ok_or_else(|| {
            PayPayError::configuration("partner_id", "PAYPAY_PARTNER_ID is not set")
        })?;
        let private_key = inline_or_file(&lookup, "PAYPAY_PRIVATE_KEY", "private_key")?;
        let public_key = inline_or_file(&lookup, "PAYPAY_PUBLIC_KEY", "public_key")?;

        let mut config = Self::new(partner_id, private_key, public_key);
        if let Some(url) = lookup("PAYPAY_BASE_URL") {
            config.base_url = url;
        }
        if let Some(language) = lookup("PAYPAY_LANGUAGE") {
            config.language = language;
        }
        if let Some(timeout) = lookup("PAYPAY_TIMEOUT_SECS") {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                PayPayError::configuration("timeout_secs", format!("not a number: {}", timeout))
            })?;
        }
        Ok(config)
    }

    /// Parse both keys.
    pub fn load_keys(&self) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        let private_key = parse_private_key(self.private_key.expose())?;
        let public_key = parse_public_key(&self.public_key)?;
        Ok((private_key, public_key))
    }

    /// Check every field that can be checked without a network call.
    pub fn validate(&self) -> Result<()> {
        self.validate_fields()?;
        self.load_keys().map(|_| ())
    }

    pub(crate) fn validate_fields(&self) -> Result<()> {
        if self.partner_id.trim().is_empty() {
            return Err(PayPayError::configuration("partner_id", "cannot be empty"));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(PayPayError::configuration(
                "base_url",
                format!("must be an http(s) URL, got '{}'", self.base_url),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PayPayError::configuration("timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

fn inline_or_file<F>(lookup: &F, var: &str, field: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(inline) = lookup(var) {
        return Ok(inline);
    }
    let path_var = format!("{}_PATH", var);
    let path = lookup(&path_var).ok_or_else(|| {
        PayPayError::configuration(field, format!("neither {} nor {} is set", var, path_var))
    })?;
    std::fs::read_to_string(&path)
        .map_err(|e| PayPayError::configuration(field, format!("cannot read {}: {}", path, e)))
}
