//! Commerce error types.

use thiserror::Error;

/// Errors raised by the product-lookup collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The catalog has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product API answered with an error status.
    #[error("HTTP error {status} fetching product {id}")]
    Http { status: u16, id: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not a product record.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The record decoded but cannot be put in a cart.
    #[error("Invalid product record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

impl LookupError {
    /// Check if the product simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_) | LookupError::Http { status: 404, .. })
    }
}

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Hydration failed because a product could not be fetched.
    #[error("Product lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Order placement requested on an empty cart.
    #[error("Cannot place an order from an empty cart")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_messages() {
        let err = LookupError::Http {
            status: 503,
            id: "m1".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503 fetching product m1");
    }

    #[test]
    fn test_not_found_detection() {
        assert!(LookupError::NotFound("m1".into()).is_not_found());
        assert!(LookupError::Http {
            status: 404,
            id: "m1".into()
        }
        .is_not_found());
        assert!(!LookupError::Transport("timed out".into()).is_not_found());
    }

    #[test]
    fn test_lookup_converts_to_commerce_error() {
        let err: CommerceError = LookupError::NotFound("m9".into()).into();
        assert!(matches!(err, CommerceError::Lookup(_)));
        assert_eq!(err.to_string(), "Product lookup failed: Product not found: m9");
    }
}
