//! Domain types shared across the route-planning pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default route origin when no warehouse has been persisted yet
/// (Philadelphia, PA).
pub const DEFAULT_ORIGIN_LAT: f64 = 39.953_372_7;
pub const DEFAULT_ORIGIN_LON: f64 = -75.165_577;

/// Errors raised when constructing or parsing domain values.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("priority must be one of: low, medium, high (got '{0}')")]
    InvalidPriority(String),

    #[error("coordinates ({latitude}, {longitude}) outside WGS-84 range")]
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },

    #[error("estimated time must be at least 1 minute (got {0})")]
    InvalidEstimatedTime(i64),
}

/// Delivery urgency for a single job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = DomainError;

    /// Case-insensitive: `"HIGH"`, `"High"` and `"high"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(DomainError::InvalidPriority(other.to_string())),
        }
    }
}

/// A single delivery stop.
///
/// `address` may be empty when only coordinates were supplied. Ids are unique
/// within a store at all times; uniqueness is enforced by the store, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub priority: Priority,
    /// Service-time estimate in minutes, at least 1.
    pub estimated_time: u32,
}

impl Job {
    /// Builds a job, validating the WGS-84 coordinate range and the
    /// minimum service time.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CoordinatesOutOfRange`] or
    /// [`DomainError::InvalidEstimatedTime`].
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
        priority: Priority,
        estimated_time: i64,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::CoordinatesOutOfRange {
                latitude,
                longitude,
            });
        }
        if estimated_time < 1 {
            return Err(DomainError::InvalidEstimatedTime(estimated_time));
        }
        let estimated_time = u32::try_from(estimated_time)
            .map_err(|_| DomainError::InvalidEstimatedTime(estimated_time))?;
        Ok(Self {
            id: id.into(),
            address: address.into(),
            latitude,
            longitude,
            priority,
            estimated_time,
        })
    }
}

/// A job enriched with its place in an optimized route.
///
/// Produced entirely by the external optimizer; immutable here. The distance
/// fields default to 0.0 because older optimizer deployments omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedJob {
    #[serde(flatten)]
    pub job: Job,
    /// 1-based position in the route, unique and contiguous across the set.
    pub route_position: u32,
    pub eta_minutes: u32,
    #[serde(default)]
    pub distance_from_prev_km: f64,
    #[serde(default)]
    pub cumulative_distance_km: f64,
}

/// Aggregate distance/time/polyline for an optimized route. Lifecycle is tied
/// 1:1 with the `OptimizedJob` set that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance_km: f64,
    pub estimated_total_time_min: u32,
    /// Traveled polyline as `[longitude, latitude]` pairs.
    pub path: Vec<[f64; 2]>,
}

/// The fixed route origin/destination. The only record persisted across
/// sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(default)]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Warehouse {
    /// The built-in origin used before any warehouse has been saved. The
    /// address label is seeded later by best-effort reverse geocoding.
    #[must_use]
    pub fn default_origin() -> Self {
        Self {
            address: String::new(),
            latitude: DEFAULT_ORIGIN_LAT,
            longitude: DEFAULT_ORIGIN_LON,
        }
    }
}

/// A geocoding provider's answer to a resolution request. Transient, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingResult {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: Option<String>,
}
