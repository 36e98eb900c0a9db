// crates/costmap-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the loading, joining and lookup layers.
///
/// Arithmetic gaps (division by zero, missing indices, an underdetermined
/// regression) are *not* errors; they are encoded in the result types of
/// [`crate::compare`] and [`crate::regression`].
#[derive(Debug, Error)]
pub enum CostMapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "snapshot")]
    #[error("Snapshot error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Missing required column `{0}` in table header")]
    MissingColumn(&'static str),

    #[error("Country `{0}` appears more than once in the table")]
    DuplicateCountry(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Data unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, CostMapError>;
