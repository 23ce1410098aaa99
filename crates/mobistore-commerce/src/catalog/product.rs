//! Product records and cart item references.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the catalog API.
///
/// Unknown fields in the payload are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in major units of the shop currency.
    pub price: f64,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manufacturer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ProductRecord {
    /// Create a record with only the required fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            description: None,
            brand: None,
        }
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A bare cart entry: what the cart remembers between page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Product identifier.
    pub id: ProductId,
    /// Selected quantity, if the user ever changed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl ItemRef {
    /// Reference with an explicit quantity.
    pub fn new(id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            quantity: Some(quantity),
        }
    }

    /// Reference without a quantity (treated as 1).
    pub fn bare(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            quantity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_unknown_fields() {
        let json = r#"{
            "id": "m1",
            "name": "Pixel 8",
            "price": 699.0,
            "image": "/img/pixel8.png",
            "ram": "8GB",
            "stock": 4
        }"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, ProductId::new("m1"));
        assert_eq!(record.image.as_deref(), Some("/img/pixel8.png"));
        assert!(record.description.is_none());
    }

    #[test]
    fn test_item_ref_quantity_optional() {
        let refs: Vec<ItemRef> =
            serde_json::from_str(r#"[{"id": "m1", "quantity": 2}, {"id": "m2"}]"#).unwrap();
        assert_eq!(refs[0], ItemRef::new("m1", 2));
        assert_eq!(refs[1], ItemRef::bare("m2"));
    }
}
