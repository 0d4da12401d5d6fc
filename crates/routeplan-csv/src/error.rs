use thiserror::Error;

/// Errors raised while serializing CSV output.
///
/// Ingestion never returns these: parse failures are collected per row into
/// the [`crate::IngestReport`] instead.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialized CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
