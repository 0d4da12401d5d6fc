use thiserror::Error;

/// Errors returned by a single geocoding provider call.
///
/// The fallback chain recovers these locally; they only reach callers through
/// provider-level APIs, never through [`crate::GeocodingResolver`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected shape.
    #[error("unexpected response from {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
