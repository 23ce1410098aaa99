//! Routing errors.

use thiserror::Error;

/// Errors from building or querying a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid route pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}
