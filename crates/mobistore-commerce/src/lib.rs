//! Cart and checkout core for the mobistore storefront.
//!
//! This crate owns the client-side cart session:
//!
//! - **Catalog**: product records and the [`ProductLookup`] seam used to hydrate them
//! - **Cart**: [`CartStore`] with line items, totals and display directives
//! - **Checkout**: [`CheckoutFlow`], the auth-gated order placement state machine
//! - **Navigation**: redirect directives handed to the router
//!
//! # Example
//!
//! ```rust,ignore
//! use mobistore_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(Currency::USD);
//! cart.hydrate(&lookup, &[ItemRef::new("m1", 2)]).await?;
//! cart.update_quantity(&ProductId::new("m1"), 3);
//!
//! let mut flow = CheckoutFlow::new(&session, RandomOrderIds::default());
//! match flow.place_order(&mut cart)? {
//!     CheckoutOutcome::Placed(view) => println!("{}", view.message()),
//!     CheckoutOutcome::Redirect(directive) => navigator.navigate(&directive),
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod navigation;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::{CommerceError, LookupError};
pub use ids::*;
pub use money::{Currency, Money};
pub use navigation::NavigationDirective;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, LookupError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::navigation::NavigationDirective;

    // Catalog
    pub use crate::catalog::{ItemRef, ProductLookup, ProductRecord};

    // Cart
    pub use crate::cart::{
        CartState, CartStore, CartView, EmptyCartView, FailurePolicy, HydratedLineItem,
        HydrationMode, HydrationReport, LineItem, LineItemView, SkippedItem, TotalView,
    };

    // Checkout
    pub use crate::checkout::{
        AuthContext, CheckoutFlow, CheckoutOutcome, CheckoutState, FixedOrderId,
        OrderConfirmationView, OrderIdGenerator, OrderResult, RandomOrderIds,
        SequentialOrderIds,
    };
}
