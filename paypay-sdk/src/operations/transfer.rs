//! Fund transfers to bank accounts and PayPay accounts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{require_non_empty, Amount, Envelope};
use crate::Result;

/// `payee_type` for transfers to a PayPay user.
pub const PAYEE_TYPE_PAYPAY_USERID: &str = "PAYPAY_USERID";

/// Transfer to a bank account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransferRequest {
    /// Merchant transfer number. Also used as the envelope `request_no`.
    pub out_biz_no: String,
    /// Account type understood by the gateway (e.g. an IBAN type).
    pub payee_type: String,
    /// Payee account identifier.
    pub payee_account: String,
    /// Amount to transfer.
    pub amount: Amount,
    /// Payer name shown to the payee.
    #[serde(default)]
    pub payer_show_name: Option<String>,
    /// Payee legal name, checked by the gateway when set.
    #[serde(default)]
    pub payee_real_name: Option<String>,
    /// Free-form remark.
    #[serde(default)]
    pub remark: Option<String>,
}

/// Transfer to a PayPay account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransferRequest {
    /// Merchant transfer number. Also used as the envelope `request_no`.
    pub out_biz_no: String,
    /// PayPay user identifier of the payee.
    pub payee_account: String,
    /// Amount to transfer.
    pub amount: Amount,
    /// Payer name shown to the payee.
    #[serde(default)]
    pub payer_show_name: Option<String>,
    /// Payee legal name, checked by the gateway when set.
    #[serde(default)]
    pub payee_real_name: Option<String>,
    /// Free-form remark.
    #[serde(default)]
    pub remark: Option<String>,
}

#[derive(Serialize)]
struct TransferBizContent<'a> {
    out_biz_no: &'a str,
    payee_type: &'a str,
    payee_account: &'a str,
    amount: &'a Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer_show_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payee_real_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remark: Option<&'a str>,
}

impl TransferBizContent<'_> {
    fn build(self) -> Result<Value> {
        require_non_empty("out_biz_no", self.out_biz_no)?;
        require_non_empty("payee_type", self.payee_type)?;
        require_non_empty("payee_account", self.payee_account)?;
        self.amount.ensure_positive("amount")?;
        Ok(serde_json::to_value(self)?)
    }
}

impl BankTransferRequest {
    /// Create a bank transfer request.
    pub fn new(
        out_biz_no: impl Into<String>,
        payee_type: impl Into<String>,
        payee_account: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            out_biz_no: out_biz_no.into(),
            payee_type: payee_type.into(),
            payee_account: payee_account.into(),
            amount: amount.into(),
            payer_show_name: None,
            payee_real_name: None,
            remark: None,
        }
    }

    /// Set the payer name shown to the payee.
    pub fn with_payer_show_name(mut self, name: impl Into<String>) -> Self {
        self.payer_show_name = Some(name.into());
        self
    }

    /// Set the payee legal name.
    pub fn with_payee_real_name(mut self, name: impl Into<String>) -> Self {
        self.payee_real_name = Some(name.into());
        self
    }

    /// Set a remark.
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Transfer business content.
    pub fn biz_content(&self) -> Result<Value> {
        TransferBizContent {
            out_biz_no: &self.out_biz_no,
            payee_type: &self.payee_type,
            payee_account: &self.payee_account,
            amount: &self.amount,
            payer_show_name: self.payer_show_name.as_deref(),
            payee_real_name: self.payee_real_name.as_deref(),
            remark: self.remark.as_deref(),
        }
        .build()
    }

    /// Envelope keyed by `out_biz_no`.
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.out_biz_no.clone())
    }
}

impl AccountTransferRequest {
    /// Create a PayPay account transfer request.
    pub fn new(
        out_biz_no: impl Into<String>,
        payee_account: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            out_biz_no: out_biz_no.into(),
            payee_account: payee_account.into(),
            amount: amount.into(),
            payer_show_name: None,
            payee_real_name: None,
            remark: None,
        }
    }

    /// Set the payer name shown to the payee.
    pub fn with_payer_show_name(mut self, name: impl Into<String>) -> Self {
        self.payer_show_name = Some(name.into());
        self
    }

    /// Set the payee legal name.
    pub fn with_payee_real_name(mut self, name: impl Into<String>) -> Self {
        self.payee_real_name = Some(name.into());
        self
    }

    /// Set a remark.
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Transfer business content with `payee_type` fixed to `PAYPAY_USERID`.
    pub fn biz_content(&self) -> Result<Value> {
        TransferBizContent {
            out_biz_no: &self.out_biz_no,
            payee_type: PAYEE_TYPE_PAYPAY_USERID,
            payee_account: &self.payee_account,
            amount: &self.amount,
            payer_show_name: self.payer_show_name.as_deref(),
            payee_real_name: self.payee_real_name.as_deref(),
            remark: self.remark.as_deref(),
        }
        .build()
    }

    /// Envelope keyed by `out_biz_no`.
    pub fn envelope(&self) -> Envelope {
        Envelope::new(self.out_biz_no.clone())
    }
}
