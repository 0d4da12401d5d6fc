pub mod error;
pub mod export;
pub mod ingest;

pub use error::CsvError;
pub use export::{csv_template, serialize_jobs, serialize_optimized_route};
pub use ingest::{parse_jobs_csv, IngestReport};
