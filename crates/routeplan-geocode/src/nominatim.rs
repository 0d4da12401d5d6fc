//! Community geocoding provider backed by the OpenStreetMap Nominatim API.
//!
//! Always available, no credential, and therefore the chain's last resort.
//! Nominatim's usage policy requires an identifying user agent; the client is
//! built with the configured one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use routeplan_core::GeocodingResult;

use crate::error::GeocodeError;
use crate::provider::{top_match, to_suggestions, GeocodingProvider, RawPlace, RawReverse};
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Client for the Nominatim search/reverse endpoints.
pub struct NominatimProvider {
    client: Client,
    search_url: Url,
    reverse_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NominatimProvider {
    /// Creates a provider pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] for an unparseable
    /// `base_url`.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;
        let search_url = base
            .join("search")
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;
        let reverse_url = base
            .join("reverse")
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
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
            pairs.append_pair("format", "json");
            pairs.append_pair("q", query);
            pairs.append_pair("limit", &limit.to_string());
            pairs.append_pair("addressdetails", "1");
        }
        url
    }

    fn reverse_query(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.reverse_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            pairs.append_pair("lat", &latitude.to_string());
            pairs.append_pair("lon", &longitude.to_string());
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
}

#[async_trait]
impl GeocodingProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn resolve(&self, address: &str) -> Result<Option<GeocodingResult>, GeocodeError> {
        let url = self.search_query(address, 1);
        let body = self.get_json(&url).await?;
        let places: Vec<RawPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: "nominatim search".to_string(),
                source: e,
            })?;
        Ok(top_match(address, places))
    }

    async fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeocodingResult>, GeocodeError> {
        let url = self.search_query(query, limit);
        let body = self.get_json(&url).await?;
        let places: Vec<RawPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: "nominatim suggest".to_string(),
                source: e,
            })?;
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
                context: "nominatim reverse".to_string(),
                source: e,
            })?;
        Ok(parsed.display_name)
    }
}
