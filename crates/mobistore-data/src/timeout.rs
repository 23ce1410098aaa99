//! Timeout configuration for product fetches.

use std::time::Duration;

/// Timeout configuration for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Duration,
    /// Total request timeout, body included.
    pub total: Duration,
}

impl TimeoutConfig {
    /// Create a new timeout configuration.
    pub fn new(connect: Duration, total: Duration) -> Self {
        Self { connect, total }
    }

    /// Derive the connect timeout from a total budget.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: total / 4,
            total,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from_total(Duration::from_secs(5))
    }
}

/// Policy applied to every product fetch.
///
/// Failed fetches are not retried; the error goes straight to the cart.
#[derive(Debug, Clone, Default)]
pub struct FetchPolicy {
    pub timeout: TimeoutConfig,
}

impl FetchPolicy {
    pub fn new(timeout: TimeoutConfig) -> Self {
        Self { timeout }
    }

    /// Policy with a total timeout in milliseconds.
    pub fn from_timeout_ms(ms: u64) -> Self {
        Self::new(TimeoutConfig::from_total(Duration::from_millis(ms)))
    }
}
