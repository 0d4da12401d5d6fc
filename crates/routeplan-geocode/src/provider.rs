//! The single capability every geocoding backend implements, plus the wire
//! shapes the Nominatim-compatible services share.

use async_trait::async_trait;
use serde::Deserialize;

use routeplan_core::GeocodingResult;

use crate::error::GeocodeError;

/// One geocoding backend in the fallback chain.
///
/// `resolve`/`reverse` return `Ok(None)` when the provider answered but
/// matched nothing; an `Err` is any transport or decoding failure. The chain
/// treats both the same way: move on to the next provider.
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Forward-geocode a free-text address to its top match.
    async fn resolve(&self, address: &str) -> Result<Option<GeocodingResult>, GeocodeError>;

    /// Rank up to `limit` candidate completions for a partial query.
    async fn suggest(&self, query: &str, limit: usize)
        -> Result<Vec<GeocodingResult>, GeocodeError>;

    /// Reverse-geocode a coordinate pair to a display label.
    async fn reverse(&self, latitude: f64, longitude: f64)
        -> Result<Option<String>, GeocodeError>;
}

/// One candidate in a Nominatim-style search response. Coordinates come back
/// as strings; candidates whose coordinates fail to parse are skipped.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

/// A Nominatim-style reverse response.
#[derive(Debug, Deserialize)]
pub(crate) struct RawReverse {
    pub display_name: Option<String>,
}

impl RawPlace {
    fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.parse::<f64>().ok()?;
        let lon = self.lon.parse::<f64>().ok()?;
        Some((lat, lon))
    }
}

/// The first usable candidate, labeled with the query it answered.
pub(crate) fn top_match(address: &str, places: Vec<RawPlace>) -> Option<GeocodingResult> {
    places.into_iter().find_map(|place| {
        let (latitude, longitude) = place.coordinates()?;
        Some(GeocodingResult {
            address: address.to_string(),
            latitude,
            longitude,
            display_name: place.display_name,
        })
    })
}

/// Every usable candidate, labeled with its own display name.
pub(crate) fn to_suggestions(places: Vec<RawPlace>) -> Vec<GeocodingResult> {
    places
        .into_iter()
        .filter_map(|place| {
            let (latitude, longitude) = place.coordinates()?;
            Some(GeocodingResult {
                address: place.display_name.clone().unwrap_or_default(),
                latitude,
                longitude,
                display_name: place.display_name,
            })
        })
        .collect()
}
