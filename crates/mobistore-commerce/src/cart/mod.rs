//! Shopping cart module.
//!
//! Contains line items, the cart store with its derived total, and the
//! display directives the rendering layer consumes.

mod line_item;
mod store;
mod view;

pub use line_item::{HydratedLineItem, LineItem, MAX_QUANTITY_PER_ITEM};
pub use store::{
    CartState, CartStore, FailurePolicy, HydrationMode, HydrationReport, SkippedItem,
};
pub use view::{CartView, EmptyCartView, LineItemView, TotalView};
