//! Gateway responses and their verification.
//!
//! A raw response object goes through three steps before the caller sees it:
//!
//! 1. its `sign` field is verified over every other top-level field,
//! 2. `biz_content` is resolved to a JSON object according to the
//!    [`BizContentMode`] in effect for the service,
//! 3. the result is deserialized into a [`PaymentResponse`].
//!
//! An unverified response never leaves this module.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "tracing")]
use crate::crypto::SIGN_KEY;
use crate::crypto::{Cipher, Signer};
use crate::params::json_type_name;
use crate::{ParameterSet, PayPayError, Result};

/// Gateway result code for a successful call.
pub const SUCCESS_CODE: &str = "10000";

const BIZ_CONTENT_KEY: &str = "biz_content";
const BIZ_CONTENT_ALIAS: &str = "bizContent";

/// How inbound `biz_content` is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BizContentMode {
    /// A JSON object, or a string holding one.
    Plaintext,
    /// Base64 RSA ciphertext addressed to the merchant key.
    Encrypted,
    /// Objects and JSON strings are plaintext, other strings are decrypted.
    #[default]
    Auto,
}

/// A verified gateway response.
///
/// Business failures (`code != "10000"`) are ordinary responses; check
/// [`is_success`](Self::is_success).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Gateway result code, `"10000"` on success.
    #[serde(deserialize_with = "string_or_number")]
    pub code: String,
    /// Result message.
    #[serde(default)]
    pub msg: String,
    /// Detailed failure code.
    #[serde(default, alias = "subCode", deserialize_with = "opt_string_or_number")]
    pub sub_code: Option<String>,
    /// Detailed failure message.
    #[serde(default, alias = "subMsg")]
    pub sub_msg: Option<String>,
    /// Gateway signature, already verified.
    pub sign: String,
    /// Signature algorithm label.
    #[serde(default, alias = "signType")]
    pub sign_type: Option<String>,
    /// Resolved business content.
    #[serde(default, alias = "bizContent")]
    pub biz_content: ResponseBizContent,
}

impl PaymentResponse {
    /// True when the gateway accepted the call.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Business content of a response.
///
/// Fields not modelled here are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBizContent {
    /// Merchant order number. Empty for operations that do not echo it.
    #[serde(default, alias = "outTradeNo")]
    pub out_trade_no: String,
    /// Gateway trade number.
    #[serde(default, alias = "tradeNo")]
    pub trade_no: Option<String>,
    /// Trade amount.
    #[serde(
        default,
        alias = "totalAmount",
        deserialize_with = "opt_string_or_number"
    )]
    pub total_amount: Option<String>,
    /// Merchant account at the gateway.
    #[serde(default, alias = "sellerId")]
    pub seller_id: Option<String>,
    /// Payment page URL.
    #[serde(default, alias = "payUrl")]
    pub pay_url: Option<String>,
    /// QR code content.
    #[serde(default, alias = "qrCode")]
    pub qr_code: Option<String>,
    /// Payment reference for reference payments.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub reference: Option<String>,
    /// Trade status for queries.
    #[serde(default, alias = "tradeStatus")]
    pub trade_status: Option<String>,
    /// Refunded amount for refunds.
    #[serde(
        default,
        alias = "refundFee",
        deserialize_with = "opt_string_or_number"
    )]
    pub refund_fee: Option<String>,
    /// Merchant transfer number for transfers.
    #[serde(default, alias = "outBizNo")]
    pub out_biz_no: Option<String>,
    /// Everything else.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Verify a raw response and turn it into a [`PaymentResponse`].
pub fn verify_response(
    raw: Value,
    signer: &Signer,
    cipher: &Cipher,
    mode: BizContentMode,
) -> Result<PaymentResponse> {
    let params = ParameterSet::try_from(raw)?;
    verify_signature(&params, signer, "response")?;

    let mut object = match params.into_json() {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    let alias = object.remove(BIZ_CONTENT_ALIAS);
    let biz_content = object.remove(BIZ_CONTENT_KEY).or(alias);
    let resolved = resolve_biz_content(biz_content.as_ref(), mode, cipher)?;
    object.insert(BIZ_CONTENT_KEY.to_string(), Value::Object(resolved));

    serde_json::from_value(Value::Object(object))
        .map_err(|e| PayPayError::Serialization(format!("malformed gateway response: {}", e)))
}

pub(crate) fn verify_signature(
    params: &ParameterSet,
    signer: &Signer,
    context: &str,
) -> Result<()> {
    if signer.verify_embedded(params) {
        return Ok(());
    }
    #[cfg(feature = "tracing")]
    tracing::warn!(
        context,
        has_sign = params.contains_key(SIGN_KEY),
        "signature verification failed"
    );
    Err(PayPayError::invalid_signature(context))
}

/// Resolve a `biz_content` value into a JSON object.
///
/// An absent or `null` value resolves to an empty object in every mode.
pub fn resolve_biz_content(
    value: Option<&Value>,
    mode: BizContentMode,
    cipher: &Cipher,
) -> Result<Map<String, Value>> {
    let value = match value {
        None | Some(Value::Null) => return Ok(Map::new()),
        Some(value) => value,
    };

    match (mode, value) {
        (BizContentMode::Plaintext | BizContentMode::Auto, Value::Object(object)) => {
            Ok(object.clone())
        }
        (BizContentMode::Plaintext, Value::String(text)) => parse_object(text).ok_or_else(|| {
            PayPayError::Decryption("plaintext biz_content is not a JSON object".to_string())
        }),
        (BizContentMode::Auto, Value::String(text)) => match parse_object(text) {
            Some(object) => Ok(object),
            None => decrypt_object(text, cipher),
        },
        (BizContentMode::Encrypted, Value::String(text)) => decrypt_object(text, cipher),
        (_, other) => Err(PayPayError::Decryption(format!(
            "biz_content cannot be a {} in {:?} mode",
            json_type_name(other),
            mode
        ))),
    }
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn decrypt_object(text: &str, cipher: &Cipher) -> Result<Map<String, Value>> {
    match cipher.decrypt(text)? {
        Value::Object(object) => Ok(object),
        other => Err(PayPayError::Decryption(format!(
            "decrypted biz_content is a {}, expected an object",
            json_type_name(&other)
        ))),
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            json_type_name(&other)
        ))),
    }
}

pub(crate) fn opt_string_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            json_type_name(&other)
        ))),
    }
}
