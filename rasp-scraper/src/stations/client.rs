//! Autocomplete search API client.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;

use crate::DEFAULT_BASE_URL;

use super::discovery::AutocompleteSource;
use super::error::StationError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One suggestion returned by the autocomplete endpoint.
///
/// Field names match the JSON payload exactly. The endpoint mixes strings
/// and numbers for the same field, so every field is read leniently into a
/// string; missing or `null` fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCandidate {
    #[serde(default, deserialize_with = "lenient_string")]
    pub prefix: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label_tail: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub gid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lon: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lat: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exp: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ecp: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub otd: String,

    /// Derived from `label_tail` after deduplication; never read from the API.
    #[serde(default, skip_deserializing)]
    pub country: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a scalar value, found {other}"
        ))),
    }
}

/// Configuration for the autocomplete client and the discovery run.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Base URL of the schedule website
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Cap on prefix extensions per root prefix; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl StationClientConfig {
    /// Create a config pointing at the production website.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_depth: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Cap the number of prefix extensions.
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the autocomplete search endpoint.
///
/// Holds a single `reqwest::Client` that is reused for every query of a
/// discovery run.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a new autocomplete client.
    pub fn new(config: &StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Query the autocomplete endpoint with a search term.
    pub async fn search(&self, term: &str) -> Result<Vec<StationCandidate>, StationError> {
        let url = format!("{}/ru/ajax/autocomplete/search/", self.base_url);

        let response = self.http.get(&url).query(&[("term", term)]).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let trimmed = body.trim();

        // An empty suggestion list is sometimes sent as a bare null
        if trimmed.is_empty() || trimmed == "null" {
            trace!(term, "empty autocomplete body");
            return Ok(Vec::new());
        }

        serde_json::from_str(trimmed).map_err(|e| StationError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl AutocompleteSource for StationClient {
    async fn search(&self, term: &str) -> Result<Vec<StationCandidate>, StationError> {
        StationClient::search(self, term).await
    }
}
