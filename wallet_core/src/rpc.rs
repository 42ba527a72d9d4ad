//! JSON-RPC 2.0 client for the wallet provider endpoint.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ProviderError;

/// HTTP client for a wallet's JSON-RPC endpoint.
///
/// Wraps `reqwest::Client` with the provider URL and a shared request id
/// counter. Cloning is cheap and clones share the connection pool.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: Arc<AtomicU64>,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

impl RpcClient {
    /// Create a client targeting the given URL (e.g. `http://127.0.0.1:8545`).
    ///
    /// Only connection establishment is bounded; requests may wait as long as
    /// the wallet needs, since signing prompts block on the user.
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// The configured provider URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a request and deserialize its `result` field.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "provider request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::Unavailable(format!("{}: {e}", self.url))
                } else {
                    ProviderError::Transport(format!("{method} failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "provider returned HTTP {} for {method}",
                response.status()
            )));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("{method}: {e}")))?;

        if let Some(err) = envelope.error {
            return Err(ProviderError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = envelope.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result)
            .map_err(|e| ProviderError::InvalidResponse(format!("{method}: {e}")))
    }
}
