//! Ordered provider chain for forward/reverse geocoding and suggestions.
//!
//! Providers are tried in priority order; a provider "fails" when it errors,
//! times out, or returns zero matches, and the chain silently moves on to the
//! next one. Only the final outcome is surfaced: the first success, or
//! nothing at all.

use routeplan_core::{AppConfig, GeocodingResult};

use crate::error::GeocodeError;
use crate::locationiq::LocationIqProvider;
use crate::nominatim::NominatimProvider;
use crate::provider::GeocodingProvider;

/// Suggestion responses are capped at this many entries.
pub const MAX_SUGGESTIONS: usize = 5;

/// Queries shorter than this never reach the network and suggest nothing.
pub const MIN_QUERY_LEN: usize = 3;

/// Resolves addresses through an ordered list of geocoding providers.
///
/// The chain never guesses: when every provider fails, the answer is `None`
/// and the caller decides what that means.
pub struct GeocodingResolver {
    providers: Vec<Box<dyn GeocodingProvider>>,
}

impl GeocodingResolver {
    /// Builds a resolver over an explicit provider list, first entry tried
    /// first.
    #[must_use]
    pub fn new(providers: Vec<Box<dyn GeocodingProvider>>) -> Self {
        Self { providers }
    }

    /// Builds the standard chain from configuration: LocationIQ first when a
    /// token is configured, Nominatim always. A missing token silently
    /// selects the community provider alone.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if an HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        let mut providers: Vec<Box<dyn GeocodingProvider>> = Vec::new();

        if let Some(token) = &config.locationiq_token {
            providers.push(Box::new(
                LocationIqProvider::new(token, config.geocode_timeout_secs, &config.user_agent)?
                    .with_retry_policy(
                        config.geocode_max_retries,
                        config.geocode_retry_backoff_ms,
                    ),
            ));
        } else {
            tracing::debug!("no LocationIQ token configured, using Nominatim only");
        }

        providers.push(Box::new(
            NominatimProvider::new(config.geocode_timeout_secs, &config.user_agent)?
                .with_retry_policy(config.geocode_max_retries, config.geocode_retry_backoff_ms),
        ));

        Ok(Self::new(providers))
    }

    /// Provider names in chain order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolves a free-text address to its top coordinate match.
    ///
    /// Coordinates are taken verbatim from the first provider that answers;
    /// there is no cross-provider ranking. `None` means every provider
    /// failed or matched nothing.
    pub async fn resolve(&self, address: &str) -> Option<GeocodingResult> {
        for provider in &self.providers {
            match provider.resolve(address).await {
                Ok(Some(result)) => {
                    tracing::debug!(provider = provider.name(), address, "address resolved");
                    return Some(result);
                }
                Ok(None) => {
                    tracing::debug!(provider = provider.name(), address, "no match, trying next");
                }
                Err(err) => {
                    tracing::debug!(
                        provider = provider.name(),
                        address,
                        error = %err,
                        "provider failed, trying next"
                    );
                }
            }
        }
        tracing::warn!(address, "all geocoding providers exhausted");
        None
    }

    /// Ranks up to [`MAX_SUGGESTIONS`] completions for a partial query.
    ///
    /// Queries under [`MIN_QUERY_LEN`] characters return an empty list
    /// without touching the network. The secondary provider is consulted
    /// only when the one before it errors or suggests nothing.
    pub async fn suggest(&self, query: &str) -> Vec<GeocodingResult> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        for provider in &self.providers {
            match provider.suggest(query, MAX_SUGGESTIONS).await {
                Ok(suggestions) if !suggestions.is_empty() => {
                    let mut suggestions = suggestions;
                    suggestions.truncate(MAX_SUGGESTIONS);
                    return suggestions;
                }
                Ok(_) => {
                    tracing::debug!(
                        provider = provider.name(),
                        query,
                        "no suggestions, trying next"
                    );
                }
                Err(err) => {
                    tracing::debug!(
                        provider = provider.name(),
                        query,
                        error = %err,
                        "suggestion lookup failed, trying next"
                    );
                }
            }
        }
        Vec::new()
    }

    /// Reverse-geocodes a coordinate pair to a display label using the same
    /// fallback ordering as [`GeocodingResolver::resolve`].
    pub async fn reverse_resolve(&self, latitude: f64, longitude: f64) -> Option<String> {
        for provider in &self.providers {
            match provider.reverse(latitude, longitude).await {
                Ok(Some(label)) => return Some(label),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(
                        provider = provider.name(),
                        latitude,
                        longitude,
                        error = %err,
                        "reverse lookup failed, trying next"
                    );
                }
            }
        }
        None
    }
}
