//! Client for Skatteverket's open dataset of test personnummer.

use std::time::Duration;

use serde::Deserialize;

use super::lookup::{DatePattern, LookupError, SampleNumberLookup};
use crate::civic::sweden;
use crate::core::Sex;

/// Rowstore dataset holding Skatteverket's published test personnummer.
pub const SKATTEVERKET_TEST_NUMBERS_URL: &str =
    "https://skatteverket.entryscape.net/rowstore/dataset/b4de7df7-63c0-4e7e-bb59-1f156a591763";

/// Connection settings for [`SkatteverketClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Dataset URL, queried with `GET`.
    pub endpoint: String,
    /// HTTP timeout per request.
    pub timeout: Duration,
    /// Maximum rows requested per query.
    pub limit: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: SKATTEVERKET_TEST_NUMBERS_URL.to_string(),
            timeout: Duration::from_secs(10),
            limit: 100,
        }
    }
}

impl RegistryConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Rowstore query response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RowstoreResponse {
    #[serde(default)]
    result_count: u64,
    #[serde(default)]
    results: Vec<RowstoreRow>,
}

#[derive(Debug, Deserialize)]
struct RowstoreRow {
    testpersonnummer: String,
}

/// HTTP client for the Skatteverket test-number dataset.
#[derive(Debug, Clone)]
pub struct SkatteverketClient {
    client: reqwest::Client,
    config: RegistryConfig,
}

impl SkatteverketClient {
    /// # Errors
    ///
    /// Returns [`LookupError::Network`] if the HTTP client cannot be built.
    pub fn new(config: RegistryConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// All test numbers starting with `pattern`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Network` on connection issues,
    /// `LookupError::Api` on a non-success status,
    /// `LookupError::Parse` on an unexpected response body.
    pub async fn search(&self, pattern: &DatePattern) -> Result<Vec<String>, LookupError> {
        let resp = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("testpersonnummer", format!("{}.*", pattern.prefix())),
                ("_limit", self.config.limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(LookupError::Api(format!("HTTP {status}: {body}")));
        }

        let parsed: RowstoreResponse = serde_json::from_str(&body)
            .map_err(|e: serde_json::Error| LookupError::Parse(e.to_string()))?;
        tracing::debug!(%pattern, result_count = parsed.result_count, "registry answered");

        Ok(parsed
            .results
            .into_iter()
            .map(|row| row.testpersonnummer)
            .collect())
    }
}

impl SampleNumberLookup for SkatteverketClient {
    async fn lookup_sample_number(
        &self,
        pattern: &DatePattern,
        sex: Sex,
    ) -> Result<Option<String>, LookupError> {
        let numbers = self.search(pattern).await?;
        Ok(numbers
            .into_iter()
            .find(|n| sweden::sex_of(n.trim()) == Some(sex)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_https() {
        assert!(RegistryConfig::default().endpoint.starts_with("https://"));
    }

    #[test]
    fn rowstore_response_deserialization() {
        let json = r#"{"resultCount":2,"offset":0,"limit":100,"queryTime":3,"results":[{"testpersonnummer":"199005142386"},{"testpersonnummer":"199005142394"}]}"#;
        let resp: RowstoreResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.result_count, 2);
        assert_eq!(resp.results[1].testpersonnummer, "199005142394");
    }

    #[test]
    fn empty_response_deserialization() {
        let resp: RowstoreResponse = serde_json::from_str(r#"{"resultCount":0,"results":[]}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn config_builders() {
        let config = RegistryConfig::default()
            .with_endpoint("http://localhost:1234/rows")
            .with_timeout(Duration::from_millis(250))
            .with_limit(5);
        assert_eq!(config.endpoint, "http://localhost:1234/rows");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.limit, 5);
    }
}
