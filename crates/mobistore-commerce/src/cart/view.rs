//! Display directives for the cart page.

use crate::cart::HydratedLineItem;
use crate::ids::ProductId;
use crate::money::Money;
use crate::navigation::PRODUCT_LIST_PATH;
use serde::{Deserialize, Serialize};

/// What the cart page should render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartView {
    /// Hydration has not completed yet.
    Loading,
    /// Hydrated, but nothing in the cart.
    Empty(EmptyCartView),
    /// Line items followed by the total bar.
    Items {
        lines: Vec<LineItemView>,
        total: TotalView,
    },
}

/// Empty-cart message with a link back to the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyCartView {
    pub message: String,
    pub shop_link: String,
}

impl Default for EmptyCartView {
    fn default() -> Self {
        Self {
            message: "Cart is empty!".to_string(),
            shop_link: PRODUCT_LIST_PATH.to_string(),
        }
    }
}

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemView {
    pub id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Option<Money>,
}

impl From<&HydratedLineItem> for LineItemView {
    fn from(item: &HydratedLineItem) -> Self {
        Self {
            id: item.line.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            description: item.description.clone(),
            quantity: item.line.quantity,
            unit_price: item.line.unit_price,
            line_total: item.line.line_total(),
        }
    }
}

/// Total bar: currency symbol and amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalView {
    pub currency: String,
    pub amount: Money,
}

impl TotalView {
    /// Render as symbol followed by amount, e.g. `$1500.00`.
    pub fn display(&self) -> String {
        format!("{}{}", self.currency, self.amount.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_empty_view_links_to_shop() {
        let view = EmptyCartView::default();
        assert_eq!(view.shop_link, "/mobile-phones");
        assert_eq!(view.message, "Cart is empty!");
    }

    #[test]
    fn test_total_display() {
        let total = TotalView {
            currency: "\u{20b9}".to_string(),
            amount: Money::new(1999, Currency::INR),
        };
        assert_eq!(total.display(), "\u{20b9}19.99");
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let json = serde_json::to_value(CartView::Loading).unwrap();
        assert_eq!(json["kind"], "loading");
    }
}
