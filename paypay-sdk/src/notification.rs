//! Asynchronous trade notifications.
//!
//! The gateway reports trade state changes by calling the merchant's
//! `notify_url`. Hosting that endpoint is up to the application; this module
//! verifies the received parameters and turns them into a [`Notification`].
//!
//! ```rust,ignore
//! let params: ParameterSet = form_fields.into_iter().collect();
//! let notification = client.verify_notification(params)?;
//! if notification.trade_status.is_paid() {
//!     fulfil(&notification.out_trade_no);
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::crypto::{Cipher, Signer, SIGN_KEY, SIGN_TYPE_KEY};
use crate::response::{
    opt_string_or_number, resolve_biz_content, verify_signature, BizContentMode,
};
use crate::{ParameterSet, PayPayError, Result};

/// Trade state reported by the gateway.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeStatus {
    /// Trade created, waiting for the payer.
    WaitBuyerPay,
    /// Paid; refunds still possible.
    TradeSuccess,
    /// Paid and no longer refundable.
    TradeFinished,
    /// Closed unpaid, or fully refunded.
    TradeClosed,
    /// A status this SDK does not know.
    Other(String),
}

impl TradeStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            TradeStatus::WaitBuyerPay => "WAIT_BUYER_PAY",
            TradeStatus::TradeSuccess => "TRADE_SUCCESS",
            TradeStatus::TradeFinished => "TRADE_FINISHED",
            TradeStatus::TradeClosed => "TRADE_CLOSED",
            TradeStatus::Other(other) => other,
        }
    }

    /// True once the payer has paid.
    pub fn is_paid(&self) -> bool {
        matches!(self, TradeStatus::TradeSuccess | TradeStatus::TradeFinished)
    }

    /// True when no further status change is expected.
    pub fn is_final(&self) -> bool {
        matches!(self, TradeStatus::TradeFinished | TradeStatus::TradeClosed)
    }
}

impl From<String> for TradeStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "WAIT_BUYER_PAY" => TradeStatus::WaitBuyerPay,
            "TRADE_SUCCESS" => TradeStatus::TradeSuccess,
            "TRADE_FINISHED" => TradeStatus::TradeFinished,
            "TRADE_CLOSED" => TradeStatus::TradeClosed,
            _ => TradeStatus::Other(value),
        }
    }
}

impl From<TradeStatus> for String {
    fn from(value: TradeStatus) -> Self {
        match value {
            TradeStatus::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified trade notification.
///
/// Fields may arrive at the top level or inside `biz_content`; top-level
/// values win when both are present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Gateway notification id.
    #[serde(default)]
    pub notify_id: Option<String>,
    /// When the gateway sent the notification.
    #[serde(default)]
    pub notify_time: Option<String>,
    /// Reported trade state.
    pub trade_status: TradeStatus,
    /// Merchant order number.
    pub out_trade_no: String,
    /// Gateway trade number.
    #[serde(default)]
    pub trade_no: Option<String>,
    /// Trade amount.
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub total_amount: Option<String>,
    /// Resolved business content, when the notification carried one.
    #[serde(default)]
    pub biz_content: Option<Map<String, Value>>,
    /// Everything else, excluding the signature fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Verify notification parameters and parse them.
///
/// The signature is checked over every received parameter except `sign` and
/// `sign_type`, with the same canonical form used for responses.
pub fn verify_notification(
    params: ParameterSet,
    signer: &Signer,
    cipher: &Cipher,
    mode: BizContentMode,
) -> Result<Notification> {
    verify_signature(&params, signer, "notification")?;

    let mut object = match params.into_json() {
        Value::Object(object) => object,
        _ => Map::new(),
    };
    object.remove(SIGN_KEY);
    object.remove(SIGN_TYPE_KEY);

    if let Some(value) = object.remove("biz_content") {
        let content = resolve_biz_content(Some(&value), mode, cipher)?;
        for (key, value) in &content {
            object.entry(key.clone()).or_insert_with(|| value.clone());
        }
        object.insert("biz_content".to_string(), Value::Object(content));
    }

    serde_json::from_value(Value::Object(object))
        .map_err(|e| PayPayError::Serialization(format!("malformed notification: {}", e)))
}
