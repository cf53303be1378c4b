//! Scripted transport and simulated gateway.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::fixtures::{gateway_cipher, gateway_signer};
use crate::crypto::{Cipher, Signer};
use crate::response::SUCCESS_CODE;
use crate::transport::Transport;
use crate::{ParameterSet, PayPayError, Result};

/// A request captured by [`MockTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// JSON body.
    pub body: Value,
}

/// Transport that records requests and replays scripted replies in order.
///
/// Sending with an empty script fails with a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Create a transport with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, reply: Value) {
        self.lock_replies().push_back(Ok(reply));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: PayPayError) {
        self.lock_replies().push_back(Err(error));
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock_requests().last().cloned()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Value>>> {
        self.replies.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, url: &str, body: &Value) -> Result<Value> {
        self.lock_requests().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
        });
        self.lock_replies()
            .pop_front()
            .unwrap_or_else(|| Err(PayPayError::Transport("no scripted reply".to_string())))
    }
}

/// The gateway side of the protocol, using the fixture gateway key pair.
#[derive(Clone, Debug)]
pub struct MockGateway {
    signer: Signer,
    cipher: Cipher,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Gateway holding the fixture gateway private key and merchant public key.
    pub fn new() -> Self {
        Self {
            signer: gateway_signer(),
            cipher: gateway_cipher(),
        }
    }

    /// Verify a merchant request and decrypt its business content.
    pub fn open_request(&self, body: &Value) -> Result<(ParameterSet, Value)> {
        let params = ParameterSet::try_from(body.clone())?;
        if !self.signer.verify_embedded(&params) {
            return Err(PayPayError::invalid_signature("request"));
        }
        let encrypted = params
            .get_str("biz_content")
            .ok_or_else(|| PayPayError::Decryption("request has no biz_content".to_string()))?;
        let content = self.cipher.decrypt(encrypted)?;
        Ok((params, content))
    }

    /// Signed success response with encrypted business content.
    pub fn success(&self, biz_content: Value) -> Value {
        self.respond(SUCCESS_CODE, "Success", Some(biz_content), true)
    }

    /// Signed business failure without business content.
    pub fn failure(&self, code: &str, sub_code: &str, sub_msg: &str) -> Value {
        let mut params = ParameterSet::new()
            .with("code", code)
            .with("msg", "Business Failed")
            .with("sub_code", sub_code)
            .with("sub_msg", sub_msg);
        self.sign(&mut params);
        params.into_json()
    }

    /// Signed response, with `biz_content` encrypted or as plaintext JSON text.
    pub fn respond(
        &self,
        code: &str,
        msg: &str,
        biz_content: Option<Value>,
        encrypt: bool,
    ) -> Value {
        let mut params = ParameterSet::new().with("code", code).with("msg", msg);
        if let Some(content) = biz_content {
            let encoded = if encrypt {
                self.cipher
                    .encrypt(&content)
                    .expect("mock gateway encrypts business content")
            } else {
                content.to_string()
            };
            params.insert("biz_content", encoded);
        }
        self.sign(&mut params);
        params.into_json()
    }

    /// Sign notification parameters the way the gateway does.
    pub fn notification(&self, mut params: ParameterSet) -> ParameterSet {
        self.sign(&mut params);
        params
    }

    /// A signed `TRADE_SUCCESS` notification for `out_trade_no`.
    pub fn trade_success_notification(
        &self,
        out_trade_no: &str,
        total_amount: &str,
    ) -> ParameterSet {
        let params = ParameterSet::new()
            .with("notify_id", format!("notify_{}", out_trade_no))
            .with("notify_type", "trade_status_sync")
            .with("trade_status", "TRADE_SUCCESS")
            .with("out_trade_no", out_trade_no)
            .with("total_amount", total_amount);
        self.notification(params)
    }

    fn sign(&self, params: &mut ParameterSet) {
        self.signer
            .sign_into(params)
            .expect("mock gateway signs with fixture key");
    }
}
