//! Error type shared by the fetcher, exporter and FFI layer
//!
//! Extraction itself never fails: missing elements yield empty fields.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset)
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read body of {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
