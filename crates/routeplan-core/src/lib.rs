pub mod app_config;
pub mod config;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_config, load_config_from_env};
pub use types::{
    DomainError, GeocodingResult, Job, OptimizedJob, Priority, RouteSummary, Warehouse,
    DEFAULT_ORIGIN_LAT, DEFAULT_ORIGIN_LON,
};

use thiserror::Error;

/// Errors raised while loading or validating application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
