//! Enhanced geocoding provider backed by the LocationIQ REST API.
//!
//! Requires an API token; the resolver only puts this provider in the chain
//! when one is configured. Better house-number accuracy than the community
//! service, 5k requests/day on the free tier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use routeplan_core::GeocodingResult;

use crate::error::GeocodeError;
use crate::provider::{top_match, to_suggestions, GeocodingProvider, RawPlace, RawReverse};
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://eu1.locationiq.com/v1/";

/// Client for the LocationIQ search/reverse endpoints.
///
/// Use [`LocationIqProvider::new`] for production or
/// [`LocationIqProvider::with_base_url`] to point at a mock server in tests.
pub struct LocationIqProvider {
    client: Client,
    token: String,
    search_url: Url,
    reverse_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl LocationIqProvider {
    /// Creates a provider pointed at the production LocationIQ API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] for an unparseable
    /// `base_url`.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: a trailing slash makes Url::join append endpoints
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;
        let search_url = base
            .join("search.php")
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;
        let reverse_url = base
            .join("reverse.php")
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            token: token.to_owned(),
            search_url,
            reverse_url,
            max_retries: 2,
            backoff_base_ms: 250,
        })
    }

    /// Overrides the transient-error retry policy (defaults: 2 retries,
    /// 250 ms base back-off).
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn search_query(&self, query: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.token);
            pairs.append_pair("q", query);
            pairs.append_pair("format", "json");
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("addressdetails", "1");
        }
        url
    }

    fn reverse_query(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.reverse_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.token);
            pairs.append_pair("lat", &latitude.to_string());
            pairs.append_pair("lon", &longitude.to_string());
            pairs.append_pair("format", "json");
            pairs.append_pair("addressdetails", "1");
        }
        url
    }

    async fn get_json(&self, url: &Url) -> Result<String, GeocodeError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async {
            let response = self.client.get(url.clone()).send().await?;
            let response = response.error_for_status()?;
            Ok(response.text().await?)
        })
        .await
    }

    async fn get_places(&self, url: &Url, context: &str) -> Result<Vec<RawPlace>, GeocodeError> {
        let body = self.get_json(url).await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            context: format!("locationiq {context}"),
            source: e,
        })
    }
}

#[async_trait]
impl GeocodingProvider for LocationIqProvider {
    fn name(&self) -> &'static str {
        "locationiq"
    }

    async fn resolve(&self, address: &str) -> Result<Option<GeocodingResult>, GeocodeError> {
        let url = self.search_query(address, 1);
        let places = self.get_places(&url, "search").await?;
        Ok(top_match(address, places))
    }

    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeocodingResult>, GeocodeError> {
        let url = self.search_query(query, limit);
        let places = self.get_places(&url, "suggest").await?;
        Ok(to_suggestions(places))
    }

    async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>, GeocodeError> {
        let url = self.reverse_query(latitude, longitude);
        let body = self.get_json(&url).await?;
        let parsed: RawReverse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: "locationiq reverse".to_string(),
                source: e,
            })?;
        Ok(parsed.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> LocationIqProvider {
        LocationIqProvider::with_base_url("test-key", 30, "test-agent", "https://geo.example.com")
            .expect("provider construction should not fail")
    }

    #[test]
    fn search_query_encodes_parameters() {
        let url = test_provider().search_query("123 Main St, Springfield", 5);
        assert!(url.as_str().starts_with("https://geo.example.com/search.php?"));
        assert!(url.as_str().contains("key=test-key"));
        assert!(url.as_str().contains("limit=5"));
        assert!(
            url.as_str().contains("123+Main+St%2C+Springfield")
                || url.as_str().contains("123%20Main%20St%2C%20Springfield"),
            "query must be percent-encoded: {url}"
        );
    }

    #[test]
    fn reverse_query_carries_coordinates() {
        let url = test_provider().reverse_query(39.9533727, -75.165577);
        assert!(url.as_str().contains("lat=39.9533727"));
        assert!(url.as_str().contains("lon=-75.165577"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let provider = LocationIqProvider::with_base_url(
            "k",
            30,
            "test-agent",
            "https://geo.example.com/v1/",
        )
        .unwrap();
        assert_eq!(
            provider.search_url.as_str(),
            "https://geo.example.com/v1/search.php"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = LocationIqProvider::with_base_url("k", 30, "test-agent", "not a url");
        assert!(matches!(result, Err(GeocodeError::InvalidBaseUrl(_))));
    }
}
