use thiserror::Error;

/// Errors returned by the optimizer service client.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered without a usable `route` — an upstream failure
    /// the operator must act on.
    #[error("optimizer returned no route{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    MissingRoute { detail: Option<String> },

    /// The response body could not be deserialized into the expected shape.
    #[error("unexpected optimizer response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// There is nothing to optimize.
    #[error("cannot optimize an empty job list")]
    NoJobs,

    /// The configured base URL is not a valid URL.
    #[error("invalid optimizer URL '{0}'")]
    InvalidBaseUrl(String),
}
