pub mod client;
pub mod error;

pub use client::{OptimizedRoute, OptimizerClient};
pub use error::OptimizerError;
