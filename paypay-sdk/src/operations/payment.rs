//! Payment creation: app, MULTICAIXA Express and reference payments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_non_empty, Amount, Envelope, Service};
use crate::Result;

const DEFAULT_TIMEOUT_EXPRESS: &str = "30m";

/// How the payer settles a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaymentProduct {
    /// In-app payment through the PayPay app.
    App,
    /// MULTICAIXA Express mobile payment.
    MulticaixaExpress,
    /// Payment by reference at an ATM or bank channel.
    Reference,
}

impl PaymentProduct {
    /// Service that creates this kind of payment.
    pub fn service(&self) -> Service {
        match self {
            PaymentProduct::App => Service::TradeAppPay,
            PaymentProduct::MulticaixaExpress | PaymentProduct::Reference => {
                Service::TradePrecreate
            }
        }
    }

    /// `product_code` sent in the business content.
    pub fn product_code(&self) -> &'static str {
        match self {
            PaymentProduct::App => "QUICK_MSECURITY_PAY",
            PaymentProduct::MulticaixaExpress => "MULTICAIXA_EXPRESS",
            PaymentProduct::Reference => "REFERENCE_PAY",
        }
    }

    /// `payment_method.type`, for products that carry one.
    pub fn payment_method_type(&self) -> Option<&'static str> {
        match self {
            PaymentProduct::App => None,
            PaymentProduct::MulticaixaExpress => Some("MULTICAIXA_EXPRESS"),
            PaymentProduct::Reference => Some("REFERENCE"),
        }
    }
}

/// A payment to create.
///
/// `request_no` doubles as the merchant order number (`out_trade_no`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant order number, unique per payment.
    pub request_no: String,
    /// Amount to charge.
    pub amount: Amount,
    /// Order title shown to the payer.
    pub subject: String,
    /// Order description. Sent as `""` when unset.
    #[serde(default)]
    pub body: Option<String>,
    /// Payment window, e.g. `"30m"`. Sent as `"30m"` when unset.
    #[serde(default)]
    pub timeout_express: Option<String>,
    /// Asynchronous notification callback.
    #[serde(default)]
    pub notify_url: Option<String>,
    /// Browser return URL.
    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Serialize)]
struct PaymentBizContent<'a> {
    out_trade_no: &'a str,
    total_amount: &'a Amount,
    subject: &'a str,
    body: &'a str,
    timeout_express: &'a str,
    product_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<PaymentMethod>,
}

#[derive(Serialize)]
struct PaymentMethod {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl PaymentRequest {
    /// Create a payment request.
    pub fn new(
        request_no: impl Into<String>,
        amount: impl Into<Amount>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            request_no: request_no.into(),
            amount: amount.into(),
            subject: subject.into(),
            body: None,
            timeout_express: None,
            notify_url: None,
            return_url: None,
        }
    }

    /// Set the order description.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the payment window.
    pub fn with_timeout_express(mut self, timeout: impl Into<String>) -> Self {
        self.timeout_express = Some(timeout.into());
        self
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

    /// Check the request before anything is signed.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("request_no", &self.request_no)?;
        self.amount.ensure_positive("total_amount")
    }

    /// Business content for `product`.
    pub fn biz_content(&self, product: PaymentProduct) -> Result<Value> {
        self.validate()?;
        let content = PaymentBizContent {
            out_trade_no: &self.request_no,
            total_amount: &self.amount,
            subject: &self.subject,
            body: self.body.as_deref().unwrap_or(""),
            timeout_express: self
                .timeout_express
                .as_deref()
                .unwrap_or(DEFAULT_TIMEOUT_EXPRESS),
            product_code: product.product_code(),
            payment_method: product
                .payment_method_type()
                .map(|kind| PaymentMethod { kind }),
        };
        Ok(serde_json::to_value(content)?)
    }

    /// Outer parameters: request number plus callback URLs.
    pub fn envelope(&self) -> Envelope {
        Envelope {
            request_no: self.request_no.clone(),
            notify_url: self.notify_url.clone(),
            return_url: self.return_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PayPayError;
    use serde_json::json;

    #[test]
    fn test_app_payment_defaults() {
        let request = PaymentRequest::new("PAY_1", 1000u64, "x");
        assert_eq!(
            request.biz_content(PaymentProduct::App).unwrap(),
            json!({
                "out_trade_no": "PAY_1",
                "total_amount": "1000",
                "subject": "x",
                "body": "",
                "timeout_express": "30m",
                "product_code": "QUICK_MSECURITY_PAY"
            })
        );
        assert_eq!(PaymentProduct::App.service(), Service::TradeAppPay);
    }

    #[test]
    fn test_precreate_products_carry_payment_method() {
        let request = PaymentRequest::new("PAY_2", Amount::parse("10.50").unwrap(), "Produto")
            .with_body("Descrição")
            .with_timeout_express("15m");

        let express = request
            .biz_content(PaymentProduct::MulticaixaExpress)
            .unwrap();
        assert_eq!(express["product_code"], "MULTICAIXA_EXPRESS");
        assert_eq!(
            express["payment_method"],
            json!({"type": "MULTICAIXA_EXPRESS"})
        );
        assert_eq!(express["total_amount"], "10.50");
        assert_eq!(express["body"], "Descrição");
        assert_eq!(express["timeout_express"], "15m");

        let reference = request.biz_content(PaymentProduct::Reference).unwrap();
        assert_eq!(reference["product_code"], "REFERENCE_PAY");
        assert_eq!(reference["payment_method"], json!({"type": "REFERENCE"}));

        assert_eq!(
            PaymentProduct::MulticaixaExpress.service(),
            Service::TradePrecreate
        );
        assert_eq!(PaymentProduct::Reference.service(), Service::TradePrecreate);
    }

    #[test]
    fn test_envelope_carries_callback_urls() {
        let request =
            PaymentRequest::new("PAY_3", 1u64, "x").with_notify_url("https://shop.example/notify");
        let envelope = request.envelope();
        assert_eq!(envelope.request_no, "PAY_3");
        assert_eq!(
            envelope.notify_url.as_deref(),
            Some("https://shop.example/notify")
        );
        assert_eq!(envelope.return_url, None);
    }

    #[test]
    fn test_validation() {
        let err = PaymentRequest::new("", 1000u64, "x")
            .biz_content(PaymentProduct::App)
            .unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "request_no"
        ));

        let err = PaymentRequest::new("PAY_1", 0u64, "x")
            .biz_content(PaymentProduct::App)
            .unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "total_amount"
        ));
    }
}
