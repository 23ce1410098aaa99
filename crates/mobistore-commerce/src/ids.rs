//! Newtype identifiers.
//!
//! Product and user ids are opaque strings handed out by the backend.
//! Order ids are small integers generated client-side at placement time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate string-backed newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// An opaque identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);

/// Identifier shown on an order confirmation.
///
/// Always within `[OrderId::MIN, OrderId::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct OrderId(u32);

impl OrderId {
    /// Smallest order id.
    pub const MIN: u32 = 1;
    /// Largest order id.
    pub const MAX: u32 = 1_000_000;
    /// The lowest valid order id.
    pub const FIRST: OrderId = OrderId(Self::MIN);

    /// Create an order id, or `None` when `value` is out of range.
    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Get the numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for OrderId {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        OrderId::new(value).ok_or_else(|| {
            format!(
                "order id {} outside [{}, {}]",
                value,
                OrderId::MIN,
                OrderId::MAX
            )
        })
    }
}

impl From<OrderId> for u32 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "m1".into();
        assert_eq!(id.as_str(), "m1");
        assert_eq!(format!("{}", id), "m1");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = ProductId::new("m42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"m42\"");
    }

    #[test]
    fn test_order_id_range() {
        assert!(OrderId::new(0).is_none());
        assert_eq!(OrderId::new(1).map(|id| id.get()), Some(1));
        assert_eq!(OrderId::new(1_000_000).map(|id| id.get()), Some(1_000_000));
        assert!(OrderId::new(1_000_001).is_none());
    }

    #[test]
    fn test_order_id_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<OrderId>("0").is_err());
        let id: OrderId = serde_json::from_str("77").unwrap();
        assert_eq!(id.get(), 77);
    }
}
