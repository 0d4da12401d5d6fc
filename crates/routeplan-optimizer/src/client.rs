//! HTTP client for the external route-optimization service.
//!
//! The service orders jobs into a route and computes timing/distance; its
//! algorithm lives elsewhere. This client only speaks the wire contract:
//! POST the warehouse origin plus the job set, get back a route and summary,
//! and treat any response lacking a `route` as a failure.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use routeplan_core::{Job, OptimizedJob, RouteSummary, Warehouse};

use crate::error::OptimizerError;

#[derive(Debug, Serialize)]
struct OriginPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct OptimizeRequest<'a> {
    warehouse: OriginPoint,
    jobs: &'a [Job],
}

/// An optimizer answer: the ordered stops and their aggregate summary.
#[derive(Debug, serde::Deserialize)]
pub struct OptimizedRoute {
    pub route: Vec<OptimizedJob>,
    pub summary: RouteSummary,
}

/// Client for the optimizer service.
///
/// Use [`OptimizerClient::new`] with the configured service URL, which also
/// serves as the mock-server hook in tests.
pub struct OptimizerClient {
    client: Client,
    optimize_url: Url,
}

impl OptimizerClient {
    /// Creates a client for the optimizer at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OptimizerError::InvalidBaseUrl`] for an
    /// unparseable URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, OptimizerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|_| OptimizerError::InvalidBaseUrl(base_url.to_string()))?;
        let optimize_url = base
            .join("optimize")
            .map_err(|_| OptimizerError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            optimize_url,
        })
    }

    /// Submits the warehouse origin and job set for optimization.
    ///
    /// # Errors
    ///
    /// - [`OptimizerError::NoJobs`] for an empty job list (rejected before
    ///   any network call).
    /// - [`OptimizerError::Http`] on network failure or non-2xx status.
    /// - [`OptimizerError::MissingRoute`] when the response carries no
    ///   `route`, with the service's `detail` message when present.
    /// - [`OptimizerError::Deserialize`] when the body does not match the
    ///   expected shape.
    pub async fn optimize(
        &self,
        warehouse: &Warehouse,
        jobs: &[Job],
    ) -> Result<OptimizedRoute, OptimizerError> {
        if jobs.is_empty() {
            return Err(OptimizerError::NoJobs);
        }

        let request = OptimizeRequest {
            warehouse: OriginPoint {
                latitude: warehouse.latitude,
                longitude: warehouse.longitude,
            },
            jobs,
        };

        tracing::debug!(jobs = jobs.len(), url = %self.optimize_url, "requesting optimization");
        let response = self
            .client
            .post(self.optimize_url.clone())
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| OptimizerError::Deserialize {
                context: "optimize".to_string(),
                source: e,
            })?;

        if envelope.get("route").is_none() {
            let detail = envelope
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string);
            return Err(OptimizerError::MissingRoute { detail });
        }

        serde_json::from_value(envelope).map_err(|e| OptimizerError::Deserialize {
            context: "optimize".to_string(),
            source: e,
        })
    }
}
