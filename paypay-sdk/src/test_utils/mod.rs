//! Test utilities for the PayPay SDK.
//!
//! - Fixed RSA key pairs for the merchant and a simulated gateway
//! - Known-answer vectors for canonicalization, signing and encryption
//! - A scripted [`MockTransport`] and a [`MockGateway`] that opens requests
//!   and produces signed responses and notifications
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paypay_sdk::test_utils::{fixtures, MockGateway, MockTransport};
//! use paypay_sdk::{PayPayClient, PaymentRequest};
//!
//! let gateway = MockGateway::new();
//! let transport = Arc::new(MockTransport::new());
//! transport.push_reply(gateway.success(json!({"out_trade_no": "PAY_1"})));
//!
//! let client = PayPayClient::with_transport(fixtures::test_config(), transport.clone())?;
//! let response = client.create_app_payment(&PaymentRequest::new("PAY_1", 1000u64, "x")).await?;
//! assert!(response.is_success());
//!
//! let (_, biz_content) = gateway.open_request(&transport.last_request().unwrap().body)?;
//! ```

pub mod fixtures;
mod mock_gateway;

pub use mock_gateway::{MockGateway, MockTransport, RecordedRequest};
