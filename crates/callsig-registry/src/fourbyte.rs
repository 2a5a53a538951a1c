//! 4byte.directory client.
//!
//! Looks function signatures up by selector. Responses are validated against
//! the documented page shape before use; only the first page is read.
//!
//! # Feature Flag
//! This module requires the `remote` feature flag (enables `reqwest` + `tokio`).
//!
//! ```toml
//! callsig-registry = { version = "0.1", features = ["remote"] }
//! ```

use async_trait::async_trait;
use callsig_core::{RegistryError, Selector, SignatureCandidate};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::source::SignatureSource;

pub const DEFAULT_BASE_URL: &str = "https://www.4byte.directory";

// ─── Error ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by {host}")]
    RateLimited { host: String },

    #[error("{host} answered HTTP {status}")]
    Status { host: String, status: u16 },

    #[error("Unexpected response from {host}: {reason}")]
    InvalidResponse { host: String, reason: String },
}

impl From<RemoteError> for RegistryError {
    fn from(e: RemoteError) -> Self {
        RegistryError::Lookup(e.to_string())
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

/// One page of `/api/v1/signatures/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FourBytePage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<FourByteResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FourByteResult {
    pub id: u64,
    pub created_at: String,
    pub text_signature: String,
    pub hex_signature: String,
    pub bytes_signature: String,
}

impl From<FourByteResult> for SignatureCandidate {
    fn from(r: FourByteResult) -> Self {
        SignatureCandidate::new(r.id, r.text_signature)
    }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// HTTP client for a 4byte.directory-compatible API.
#[derive(Debug, Clone)]
pub struct FourByteClient {
    client: Client,
    base_url: String,
}

impl FourByteClient {
    /// Client against the public 4byte.directory with a 15s timeout.
    pub fn new() -> Result<Self, RemoteError> {
        Self::with_base(DEFAULT_BASE_URL, Duration::from_secs(15))
    }

    /// Client against a self-hosted mirror.
    pub fn with_base(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("callsig/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the first result page for `selector`.
    pub async fn lookup(&self, selector: Selector) -> Result<FourBytePage, RemoteError> {
        let url = format!("{}/api/v1/signatures/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("hex_signature", selector.to_string())])
            .send()
            .await?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(RemoteError::RateLimited {
                    host: self.base_url.clone(),
                })
            }
            s if !s.is_success() => {
                return Err(RemoteError::Status {
                    host: self.base_url.clone(),
                    status: s.as_u16(),
                })
            }
            _ => {}
        }

        let body = resp.text().await?;
        let page = parse_page(&body).map_err(|e| RemoteError::InvalidResponse {
            host: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        debug!(%selector, count = page.count, returned = page.results.len(), "4byte lookup");
        Ok(page)
    }
}

#[async_trait]
impl SignatureSource for FourByteClient {
    async fn candidates_for(
        &self,
        selector: Selector,
    ) -> Result<Vec<SignatureCandidate>, RegistryError> {
        let page = self.lookup(selector).await?;
        Ok(page.results.into_iter().map(SignatureCandidate::from).collect())
    }

    fn name(&self) -> &str {
        "4byte"
    }
}

/// Strictly parse a result page; any missing field is an error.
pub fn parse_page(body: &str) -> Result<FourBytePage, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "count": 2,
        "next": null,
        "previous": null,
        "results": [
            {
                "id": 31780,
                "created_at": "2018-05-12T02:03:37.263416Z",
                "text_signature": "many_msg_babbage(bytes1)",
                "hex_signature": "0xa9059cbb",
                "bytes_signature": "©\u0005œ»"
            },
            {
                "id": 145,
                "created_at": "2016-07-09T03:58:28.234977Z",
                "text_signature": "transfer(address,uint256)",
                "hex_signature": "0xa9059cbb",
                "bytes_signature": "©\u0005œ»"
            }
        ]
    }"#;

    #[test]
    fn parses_result_page() {
        let page = parse_page(PAGE).unwrap();
        assert_eq!(page.count, 2);
        let cands: Vec<SignatureCandidate> =
            page.results.into_iter().map(SignatureCandidate::from).collect();
        assert_eq!(cands[1], SignatureCandidate::new(145, "transfer(address,uint256)"));
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_page(r#"{"results": []}"#).is_err());
        assert!(parse_page(r#"{"count":1,"next":null,"previous":null,"results":[{"id":1}]}"#).is_err());
    }

    #[test]
    fn errors_name_the_host_and_convert_to_lookup() {
        let err = RemoteError::Status {
            host: "https://mirror.example".into(),
            status: 502,
        };
        assert_eq!(err.to_string(), "https://mirror.example answered HTTP 502");
        assert!(std::error::Error::source(&err).is_none());

        let reg: RegistryError = RemoteError::RateLimited { host: "h".into() }.into();
        assert!(matches!(reg, RegistryError::Lookup(ref m) if m == "Rate limited by h"));
    }

    #[test]
    fn trims_trailing_slash() {
        let c = FourByteClient::with_base("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(c.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn lookup_transfer_selector() {
        let client = FourByteClient::new().unwrap();
        let cands = client
            .candidates_for("0xa9059cbb".parse().unwrap())
            .await
            .unwrap();
        assert!(cands.iter().any(|c| c.signature == "transfer(address,uint256)"));
    }
}
