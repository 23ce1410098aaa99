//! Line item types.

use crate::catalog::ProductRecord;
use crate::error::LookupError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A single product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier.
    pub id: ProductId,
    /// Selected quantity, `1..=MAX_QUANTITY_PER_ITEM`.
    pub quantity: i64,
    /// Price of one unit, never negative.
    pub unit_price: Money,
}

impl LineItem {
    /// Price of the whole line, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_mul(self.quantity)
    }

    /// Check if `quantity` may be stored on a line.
    pub fn is_valid_quantity(quantity: i64) -> bool {
        (1..=MAX_QUANTITY_PER_ITEM).contains(&quantity)
    }
}

/// A line item enriched with product attributes for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydratedLineItem {
    /// The priced line.
    pub line: LineItem,
    /// Product name.
    pub name: String,
    /// Image URL.
    pub image: Option<String>,
    /// Product description.
    pub description: Option<String>,
}

impl HydratedLineItem {
    /// Merge a fetched record with the quantity the cart remembered.
    ///
    /// The record's decimal price is converted to `currency`; a negative or
    /// non-representable price makes the record unusable.
    pub fn from_record(
        record: ProductRecord,
        quantity: i64,
        currency: Currency,
    ) -> Result<Self, LookupError> {
        let unit_price = Money::from_decimal(record.price, currency)
            .filter(|price| !price.is_negative())
            .ok_or_else(|| LookupError::InvalidRecord {
                id: record.id.to_string(),
                reason: format!("price {} is not a valid amount", record.price),
            })?;

        Ok(Self {
            line: LineItem {
                id: record.id,
                quantity,
                unit_price,
            },
            name: record.name,
            image: record.image,
            description: record.description,
        })
    }

    /// Product identifier.
    pub fn id(&self) -> &ProductId {
        &self.line.id
    }

    /// Selected quantity.
    pub fn quantity(&self) -> i64 {
        self.line.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_converts_price() {
        let record = ProductRecord::new("m1", "Galaxy S24", 500.0).with_image("/img/s24.png");
        let item = HydratedLineItem::from_record(record, 2, Currency::USD).unwrap();

        assert_eq!(item.id().as_str(), "m1");
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.line.unit_price, Money::new(50000, Currency::USD));
        assert_eq!(item.line.line_total(), Some(Money::new(100000, Currency::USD)));
        assert_eq!(item.image.as_deref(), Some("/img/s24.png"));
    }

    #[test]
    fn test_from_record_rejects_negative_price() {
        let record = ProductRecord::new("m1", "Broken", -1.0);
        let err = HydratedLineItem::from_record(record, 1, Currency::USD).unwrap_err();
        assert!(matches!(err, LookupError::InvalidRecord { .. }));
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(!LineItem::is_valid_quantity(0));
        assert!(LineItem::is_valid_quantity(1));
        assert!(LineItem::is_valid_quantity(MAX_QUANTITY_PER_ITEM));
        assert!(!LineItem::is_valid_quantity(MAX_QUANTITY_PER_ITEM + 1));
    }
}
