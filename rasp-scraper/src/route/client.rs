//! Route results page client.

use chrono::NaiveDate;
use tracing::debug;

use crate::DEFAULT_BASE_URL;

use super::align::AlignmentPolicy;
use super::error::RouteError;
use super::model::TrainModel;
use super::parser::parse_route_page;

/// Origin, destination and travel date of a route search.
///
/// `*_exp` and `*_esr` are the station codes the website expects alongside
/// the station names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub from: String,
    pub from_exp: String,
    pub from_esr: String,
    pub to: String,
    pub to_exp: String,
    pub to_esr: String,
    pub date: NaiveDate,
}

impl RouteQuery {
    /// Query string parameters, in the order the website emits them.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("from", self.from.clone()),
            ("from_exp", self.from_exp.clone()),
            ("from_esr", self.from_esr.clone()),
            ("to", self.to.clone()),
            ("to_exp", self.to_exp.clone()),
            ("to_esr", self.to_esr.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl Default for RouteQuery {
    /// Минск → Брест on 2018-08-22.
    fn default() -> Self {
        Self {
            from: "Минск".to_string(),
            from_exp: "2100000".to_string(),
            from_esr: "140210".to_string(),
            to: "Брест".to_string(),
            to_exp: "2100200".to_string(),
            to_esr: "130007".to_string(),
            date: NaiveDate::from_ymd_opt(2018, 8, 22).unwrap_or_default(),
        }
    }
}

/// Configuration for the route page client.
#[derive(Debug, Clone)]
pub struct RouteClientConfig {
    /// Base URL of the schedule website
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RouteClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
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
}

impl Default for RouteClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the mobile route results page.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RouteClient {
    pub fn new(config: &RouteClientConfig) -> Result<Self, RouteError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Download the results page HTML.
    pub async fn fetch_page(&self, query: &RouteQuery) -> Result<String, RouteError> {
        let url = format!("{}/m/ru/route/", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), from = %query.from, to = %query.to, "fetched route page");
        Ok(body)
    }

    /// Download and parse the results page.
    pub async fn fetch_trains(
        &self,
        query: &RouteQuery,
        policy: AlignmentPolicy,
    ) -> Result<Vec<TrainModel>, RouteError> {
        let html = self.fetch_page(query).await?;
        parse_route_page(&html, query.date, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_is_minsk_to_brest() {
        let pairs = RouteQuery::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("from", "Минск".to_string()),
                ("from_exp", "2100000".to_string()),
                ("from_esr", "140210".to_string()),
                ("to", "Брест".to_string()),
                ("to_exp", "2100200".to_string()),
                ("to_esr", "130007".to_string()),
                ("date", "2018-08-22".to_string()),
            ]
        );
    }

    #[test]
    fn config_builder() {
        let config = RouteClientConfig::new()
            .with_base_url("http://localhost:8080/")
            .with_timeout(10);

        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout_secs, 10);

        assert!(RouteClient::new(&config).is_ok());
    }

    #[test]
    fn config_defaults() {
        let config = RouteClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }
}
