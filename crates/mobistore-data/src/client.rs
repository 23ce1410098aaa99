//! HTTP product lookup against the catalog API.

use async_trait::async_trait;
use mobistore_commerce::catalog::{ProductLookup, ProductRecord};
use mobistore_commerce::{LookupError, ProductId};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;

use crate::error::DataError;
use crate::timeout::FetchPolicy;

/// Fetches products from `GET {base_url}/mobiles/{id}`.
#[derive(Debug, Clone)]
pub struct HttpProductLookup {
    client: reqwest::Client,
    base_url: String,
    policy: FetchPolicy,
}

impl HttpProductLookup {
    /// Create a client with the default fetch policy.
    pub fn new(base_url: &str) -> Result<Self, DataError> {
        Self::with_policy(base_url, FetchPolicy::default())
    }

    /// Create a client with an explicit fetch policy.
    pub fn with_policy(base_url: &str, policy: FetchPolicy) -> Result<Self, DataError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DataError::InvalidBaseUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            policy,
        })
    }

    /// URL of a single product.
    pub fn product_url(&self, id: &ProductId) -> String {
        format!("{}/mobiles/{}", self.base_url, id)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }
}

#[async_trait]
impl ProductLookup for HttpProductLookup {
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
        let url = self.product_url(id);
        debug!(%url, "GET product");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                id: id.to_string(),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        decode_record(&bytes)
    }
}

/// Decode a product payload.
fn decode_record(body: &[u8]) -> Result<ProductRecord, LookupError> {
    serde_json::from_slice(body).map_err(|e| LookupError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_url_trims_trailing_slash() {
        let lookup = HttpProductLookup::new("http://localhost:4000/api/").unwrap();
        assert_eq!(lookup.base_url(), "http://localhost:4000/api");
        assert_eq!(
            lookup.product_url(&ProductId::new("m7")),
            "http://localhost:4000/api/mobiles/m7"
        );
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = HttpProductLookup::new("localhost:4000").unwrap_err();
        assert!(matches!(err, DataError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_decode_record() {
        let record = decode_record(br#"{"id":"m1","name":"Nokia 3310","price":59.0}"#).unwrap();
        assert_eq!(record.name, "Nokia 3310");

        let err = decode_record(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, LookupError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let lookup =
            HttpProductLookup::with_policy("http://127.0.0.1:9", FetchPolicy::from_timeout_ms(500))
                .unwrap();
        let err = lookup.fetch_product(&ProductId::new("m1")).await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
    }
}
