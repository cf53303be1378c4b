//! Operations on an existing trade: query, close and refund.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_non_empty, Amount, Envelope};
use crate::clock::{generate_request_no, Clock};
use crate::{PayPayError, Result};

/// Identifies an existing trade for query or close.
///
/// At least one of `out_trade_no` and `trade_no` must be set. Without an
/// explicit `request_no` one is generated from the clock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Merchant order number.
    #[serde(default)]
    pub out_trade_no: Option<String>,
    /// Gateway trade number.
    #[serde(default)]
    pub trade_no: Option<String>,
    /// Request number override.
    #[serde(default)]
    pub request_no: Option<String>,
}

/// Close requests identify trades the same way queries do.
pub type CloseRequest = QueryRequest;

#[derive(Serialize)]
struct TradeLookup<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    out_trade_no: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_no: Option<&'a str>,
}

impl QueryRequest {
    /// Look up by merchant order number.
    pub fn by_out_trade_no(out_trade_no: impl Into<String>) -> Self {
        Self {
            out_trade_no: Some(out_trade_no.into()),
            ..Self::default()
        }
    }

    /// Look up by gateway trade number.
    pub fn by_trade_no(trade_no: impl Into<String>) -> Self {
        Self {
            trade_no: Some(trade_no.into()),
            ..Self::default()
        }
    }

    /// Also send the gateway trade number.
    pub fn with_trade_no(mut self, trade_no: impl Into<String>) -> Self {
        self.trade_no = Some(trade_no.into());
        self
    }

    /// Use an explicit request number.
    pub fn with_request_no(mut self, request_no: impl Into<String>) -> Self {
        self.request_no = Some(request_no.into());
        self
    }

    /// Check that the trade is identified.
    pub fn validate(&self) -> Result<()> {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !present(&self.out_trade_no) && !present(&self.trade_no) {
            return Err(PayPayError::invalid_request(
                "out_trade_no",
                "either out_trade_no or trade_no is required",
            ));
        }
        if let Some(request_no) = &self.request_no {
            require_non_empty("request_no", request_no)?;
        }
        Ok(())
    }

    /// Business content with only the identifiers that are set.
    pub fn biz_content(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(TradeLookup {
            out_trade_no: self.out_trade_no.as_deref(),
            trade_no: self.trade_no.as_deref(),
        })?)
    }

    /// Envelope with the explicit request number or `{prefix}_{millis}`.
    pub fn envelope(&self, prefix: &str, clock: &dyn Clock) -> Envelope {
        match &self.request_no {
            Some(request_no) => Envelope::new(request_no.clone()),
            None => Envelope::new(generate_request_no(prefix, clock)),
        }
    }
}

/// A full or partial refund of a trade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Merchant order number of the trade being refunded.
    pub out_trade_no: String,
    /// Gateway trade number.
    #[serde(default)]
    pub trade_no: Option<String>,
    /// Amount to refund.
    pub refund_amount: Amount,
    /// Reason shown to the payer. Sent as `""` when unset.
    #[serde(default)]
    pub refund_reason: Option<String>,
    /// Refund request number, unique per refund of the trade. Also used as
    /// the envelope `request_no`.
    pub out_request_no: String,
}

#[derive(Serialize)]
struct RefundBizContent<'a> {
    out_trade_no: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_no: Option<&'a str>,
    refund_amount: &'a Amount,
    refund_reason: &'a str,
    out_request_no: &'a str,
}

impl RefundRequest {
    /// Create a refund request.
    pub fn new(
        out_trade_no: impl Into<String>,
        refund_amount: impl Into<Amount>,
        out_request_no: impl Into<String>,
    ) -> Self {
        Self {
            out_trade_no: out_trade_no.into(),
            trade_no: None,
            refund_amount: refund_amount.into(),
            refund_reason: None,
            out_request_no: out_request_no.into(),
        }
    }

    /// Also send the gateway trade number.
    pub fn with_trade_no(mut self, trade_no: impl Into<String>) -> Self {
        self.trade_no = Some(trade_no.into());
        self
    }

    /// Set the refund reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.refund_reason = Some(reason.into());
        self
    }

    /// Check the request before anything is signed.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("out_trade_no", &self.out_trade_no)?;
        require_non_empty("out_request_no", &self.out_request_no)?;
        self.refund_amount.ensure_positive("refund_amount")
    }

    /// Refund business content.
    pub fn biz_content(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(RefundBizContent {
            out_trade_no: &self.out_trade_no,
            trade_no: self.trade_no.as_deref(),
            refund_amount: &self.refund_amount,
            refund_reason: self.refund_reason.as_deref().unwrap_or(""),
            out_request_no: &self.out_request_no,
        })?)
    }

    /// Envelope keyed by `out_request_no`.
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.out_request_no.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use serde_json::json;

    #[test]
    fn test_query_sends_only_present_identifiers() {
        let query = QueryRequest::by_out_trade_no("PAY_1");
        assert_eq!(
            query.biz_content().unwrap(),
            json!({"out_trade_no": "PAY_1"})
        );

        let query = QueryRequest::by_trade_no("2024010122001").with_request_no("Q1");
        assert_eq!(
            query.biz_content().unwrap(),
            json!({"trade_no": "2024010122001"})
        );
    }

    #[test]
    fn test_query_requires_an_identifier() {
        let err = QueryRequest::default().biz_content().unwrap_err();
        assert!(matches!(err, PayPayError::InvalidRequest { .. }));

        let err = QueryRequest::by_out_trade_no("  ")
            .biz_content()
            .unwrap_err();
        assert!(matches!(err, PayPayError::InvalidRequest { .. }));

        let err = QueryRequest::by_out_trade_no("PAY_1")
            .with_request_no("")
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "request_no"
        ));
    }

    #[test]
    fn test_query_envelope_request_numbers() {
        let clock = FixedClock::from_millis(1_704_067_200_000);

        let generated = QueryRequest::by_out_trade_no("PAY_1").envelope("query", &clock);
        assert_eq!(generated.request_no, "query_1704067200000");

        let closed = QueryRequest::by_out_trade_no("PAY_1").envelope("close", &clock);
        assert_eq!(closed.request_no, "close_1704067200000");

        let explicit = QueryRequest::by_out_trade_no("PAY_1")
            .with_request_no("Q-42")
            .envelope("query", &clock);
        assert_eq!(explicit.request_no, "Q-42");
    }

    #[test]
    fn test_refund_without_reason_sends_empty_reason() {
        let refund = RefundRequest::new("PAY_1", 500u64, "REF_1");
        assert_eq!(
            refund.biz_content().unwrap(),
            json!({
                "out_trade_no": "PAY_1",
                "refund_amount": "500",
                "refund_reason": "",
                "out_request_no": "REF_1"
            })
        );
        assert_eq!(refund.envelope().request_no, "REF_1");
    }

    #[test]
    fn test_refund_with_reason_and_trade_no() {
        let refund = RefundRequest::new("PAY_1", 500u64, "REF_1")
            .with_trade_no("T1")
            .with_reason("Produto com defeito");
        let content = refund.biz_content().unwrap();
        assert_eq!(content["trade_no"], "T1");
        assert_eq!(content["refund_reason"], "Produto com defeito");
    }

    #[test]
    fn test_refund_validation() {
        let err = RefundRequest::new("PAY_1", 0u64, "REF_1")
            .biz_content()
            .unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "refund_amount"
        ));

        let err = RefundRequest::new("PAY_1", 1u64, "")
            .biz_content()
            .unwrap_err();
        assert!(matches!(
            err,
            PayPayError::InvalidRequest { ref field, .. } if field == "out_request_no"
        ));
    }
}
