use thiserror::Error;

/// Errors raised by the job store and the warehouse persistence store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A job with this id is already present; the caller decides
    /// keep-or-replace.
    #[error("duplicate job id: {0}")]
    DuplicateId(String),

    /// No job with this id exists.
    #[error("unknown job id: {0}")]
    UnknownId(String),

    /// Route positions were not 1-based, unique and contiguous.
    #[error("route positions must be 1-based, unique and contiguous")]
    MalformedRoute,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted warehouse record is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
