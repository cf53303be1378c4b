//! Gateway operations and their business content.
//!
//! Every operation turns a typed request into three things: the service
//! name, an [`Envelope`] of outer parameters, and the business content JSON
//! that is encrypted into `biz_content`.
//!
//! | Request | Service |
//! |---------|---------|
//! | [`PaymentRequest`] + [`PaymentProduct::App`] | `alipay.trade.app.pay` |
//! | [`PaymentRequest`] + [`PaymentProduct::MulticaixaExpress`] | `alipay.trade.precreate` |
//! | [`PaymentRequest`] + [`PaymentProduct::Reference`] | `alipay.trade.precreate` |
//! | [`QueryRequest`] | `alipay.trade.query` / `alipay.trade.close` |
//! | [`RefundRequest`] | `alipay.trade.refund` |
//! | [`BankTransferRequest`], [`AccountTransferRequest`] | `alipay.fund.trans.toaccount.transfer` |

mod amount;
mod payment;
mod trade;
mod transfer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PayPayError, Result};

pub use amount::Amount;
pub use payment::{PaymentProduct, PaymentRequest};
pub use trade::{CloseRequest, QueryRequest, RefundRequest};
pub use transfer::{AccountTransferRequest, BankTransferRequest, PAYEE_TYPE_PAYPAY_USERID};

/// Gateway service names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    /// `alipay.trade.app.pay`
    #[serde(rename = "alipay.trade.app.pay")]
    TradeAppPay,
    /// `alipay.trade.precreate`
    #[serde(rename = "alipay.trade.precreate")]
    TradePrecreate,
    /// `alipay.trade.query`
    #[serde(rename = "alipay.trade.query")]
    TradeQuery,
    /// `alipay.trade.refund`
    #[serde(rename = "alipay.trade.refund")]
    TradeRefund,
    /// `alipay.trade.close`
    #[serde(rename = "alipay.trade.close")]
    TradeClose,
    /// `alipay.fund.trans.toaccount.transfer`
    #[serde(rename = "alipay.fund.trans.toaccount.transfer")]
    FundTransfer,
}

impl Service {
    /// Wire name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::TradeAppPay => "alipay.trade.app.pay",
            Service::TradePrecreate => "alipay.trade.precreate",
            Service::TradeQuery => "alipay.trade.query",
            Service::TradeRefund => "alipay.trade.refund",
            Service::TradeClose => "alipay.trade.close",
            Service::FundTransfer => "alipay.fund.trans.toaccount.transfer",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer request parameters that vary per call.
///
/// Everything else in the envelope (partner, timestamp, charset, ...) comes
/// from configuration and the clock.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    /// Caller-unique request number, sent as `request_no`.
    pub request_no: String,
    /// Asynchronous notification callback, sent only when set.
    pub notify_url: Option<String>,
    /// Browser return URL, sent only when set.
    pub return_url: Option<String>,
}

impl Envelope {
    /// Envelope with only a request number.
    pub fn new(request_no: impl Into<String>) -> Self {
        Self {
            request_no: request_no.into(),
            notify_url: None,
            return_url: None,
        }
    }

    /// Set the notification callback URL.
    pub fn with_notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self
    }

    /// Set the return URL.
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PayPayError::invalid_request(field, "cannot be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_names() {
        assert_eq!(Service::TradeAppPay.as_str(), "alipay.trade.app.pay");
        assert_eq!(
            Service::TradePrecreate.to_string(),
            "alipay.trade.precreate"
        );
        assert_eq!(
            serde_json::to_value(Service::FundTransfer).unwrap(),
            serde_json::json!("alipay.fund.trans.toaccount.transfer")
        );
        let close = serde_json::json!("alipay.trade.close");
        let parsed: Service = serde_json::from_value(close).unwrap();
        assert_eq!(parsed, Service::TradeClose);
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("request_no", "PAY_1").is_ok());
        let err = require_non_empty("request_no", "  ").unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "request_no"
        ));
    }
}
