//! Authentication errors.

use std::path::PathBuf;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login attempted without a user name.
    #[error("username must not be empty")]
    EmptyUsername,

    /// Session lifetime must be positive.
    #[error("invalid session lifetime: {0}s")]
    InvalidLifetime(i64),

    /// Session file could not be read or written.
    #[error("session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Session file is corrupt.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
