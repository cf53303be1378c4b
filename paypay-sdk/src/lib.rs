//! PayPay Africa gateway client.
//!
//! The gateway speaks an Alipay-compatible protocol: every request is a flat
//! JSON envelope whose business payload is RSA-encrypted for the gateway and
//! whose parameters are signed with SHA1withRSA by the merchant. Responses
//! come back signed by the gateway and are verified before the caller sees
//! them.
//!
//! This crate stays stateless: the client holds immutable configuration and
//! keys, and takes its network access and clock through trait-based
//! dependency injection.
//!
//! # Features
//!
//! - **Payments**: app, MULTICAIXA Express and reference payments
//! - **Trade management**: query, refund and close
//! - **Transfers**: to bank accounts and PayPay accounts
//! - **Notifications**: signature verification and typed parsing
//! - **Transport Abstraction**: `reqwest` by default, any [`Transport`] for tests
//!
//! # Example
//!
//! ```ignore
//! use paypay_sdk::{PayPayClient, PayPayConfig, QueryRequest};
//!
//! let client = PayPayClient::new(PayPayConfig::from_env()?)?;
//! let response = client.query_payment(&QueryRequest::by_out_trade_no("PAY_1")).await?;
//! if response.is_success() {
//!     println!("status: {:?}", response.biz_content.trade_status);
//! }
//! ```

pub mod client;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod notification;
pub mod operations;
pub mod params;
pub mod prelude;
pub mod response;
pub mod transport;

/// Test utilities: fixture keys, a scripted transport and a simulated gateway.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::PayPayClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PayPayConfig;
pub use errors::{PayPayError, PayPayErrorCode};
pub use notification::{Notification, TradeStatus};
pub use operations::{
    AccountTransferRequest, Amount, BankTransferRequest, CloseRequest, Envelope, PaymentProduct,
    PaymentRequest, QueryRequest, RefundRequest, Service,
};
pub use params::ParameterSet;
pub use response::{BizContentMode, PaymentResponse, ResponseBizContent};
pub use transport::{HttpTransport, Transport};

/// Common result alias for PayPay operations.
pub type Result<T> = std::result::Result<T, PayPayError>;
