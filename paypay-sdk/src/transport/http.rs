//! HTTP transport backed by `reqwest`.
//!
//! # Feature Flags
//!
//! Requires the `http-transport` feature (on by default). Without it,
//! [`HttpTransport::send`] returns an `Unimplemented` error.

use async_trait::async_trait;
use serde_json::Value;
#[cfg(feature = "http-transport")]
use std::time::Duration;

use super::Transport;
use crate::config::PayPayConfig;
use crate::{PayPayError, Result};

/// JSON-over-HTTPS transport.
///
/// Each call is a single POST with the client-level timeout; there are no
/// retries.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    timeout_secs: u64,
    #[cfg(feature = "http-transport")]
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    #[cfg(feature = "http-transport")]
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PayPayError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            timeout_secs,
            client,
        })
    }

    /// Create a transport with the given request timeout (stub when feature disabled).
    #[cfg(not(feature = "http-transport"))]
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self { timeout_secs })
    }

    /// Create a transport using the configured timeout.
    pub fn from_config(config: &PayPayConfig) -> Result<Self> {
        Self::new(config.timeout_secs)
    }

    /// Request timeout in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Map reqwest errors to PayPayError.
    #[cfg(feature = "http-transport")]
    fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> PayPayError {
        if e.is_timeout() {
            PayPayError::ConnectionTimeout {
                operation: "gateway request".to_string(),
                timeout_ms: self.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            PayPayError::ConnectionFailed {
                target: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            PayPayError::Transport(format!("gateway request failed: {}", e))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[cfg(feature = "http-transport")]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, body), fields(timeout_secs = self.timeout_secs)))]
    async fn send(&self, url: &str, body: &Value) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_reqwest_error(url, e))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            status = status.as_u16(),
            bytes = text.len(),
            "gateway replied"
        );

        if !status.is_success() {
            return Err(PayPayError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            PayPayError::Serialization(format!("Failed to parse gateway response: {}", e))
        })
    }

    #[cfg(not(feature = "http-transport"))]
    async fn send(&self, _url: &str, _body: &Value) -> Result<Value> {
        Err(PayPayError::Unimplemented(
            "HTTP transport not compiled - enable the 'http-transport' feature",
        ))
    }
}
