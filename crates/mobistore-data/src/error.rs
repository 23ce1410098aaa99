//! Data layer errors.

use std::path::PathBuf;

/// Errors raised while setting up a product source.
///
/// Failures of individual lookups are reported as
/// [`mobistore_commerce::LookupError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
