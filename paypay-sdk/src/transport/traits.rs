use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Delivers a signed request to the gateway and returns the raw response.
///
/// Implementations only move JSON: they never verify or decrypt. A non-2xx
/// reply must surface as an error before the body is handed back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the decoded JSON response.
    async fn send(&self, url: &str, body: &Value) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, url: &str, body: &Value) -> Result<Value> {
        (**self).send(url, body).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, url: &str, body: &Value) -> Result<Value> {
        (**self).send(url, body).await
    }
}
