//! Minimal Ethereum JSON-RPC client: just `eth_getTransactionByHash`.

use alloy_primitives::U256;
use callsig_core::TransactionFields;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid transaction hash '{0}': expected 0x + 64 hex chars")]
    InvalidHash(String),

    #[error("RPC error: {0}")]
    Rpc(serde_json::Value),

    #[error("transaction {0} not found")]
    NotFound(String),

    #[error("malformed field '{field}': {reason}")]
    Malformed { field: &'static str, reason: String },
}

// ─── JSON-RPC types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<serde_json::Value>,
}

/// The subset of an RPC transaction object the interpreter needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcTransaction {
    pub hash: String,
    pub to: Option<String>,
    /// Hex quantity
    pub value: String,
    /// `0x` call data
    pub input: String,
}

impl RpcTransaction {
    pub fn fields(&self) -> Result<TransactionFields, RpcError> {
        let digits = self.value.strip_prefix("0x").unwrap_or(&self.value);
        let value = if digits.is_empty() {
            U256::ZERO
        } else {
            U256::from_str_radix(digits, 16).map_err(|e| RpcError::Malformed {
                field: "value",
                reason: e.to_string(),
            })?
        };
        Ok(TransactionFields::new(self.to.clone(), value))
    }
}

/// A 32-byte hash: `0x` followed by 64 hex digits.
pub fn validate_tx_hash(hash: &str) -> Result<(), RpcError> {
    let ok = hash.len() == 66
        && hash.starts_with("0x")
        && hash[2..].bytes().all(|b| b.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(RpcError::InvalidHash(hash.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<RpcTransaction, RpcError> {
        validate_tx_hash(hash)?;
        let req = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_getTransactionByHash",
            "params": [hash]
        });
        let resp: JsonRpcResponse<RpcTransaction> = self
            .client
            .post(&self.url)
            .json(&req)
            .send()
            .await?
            .json()
            .await?;
        if let Some(err) = resp.error {
            return Err(RpcError::Rpc(err));
        }
        resp.result.ok_or_else(|| RpcError::NotFound(hash.to_string()))
    }
}
