//! Checkout module.
//!
//! Contains the auth-gated order placement flow and order results.

mod flow;
mod order;

pub use flow::{AuthContext, CheckoutFlow, CheckoutOutcome, CheckoutState};
pub use order::{
    FixedOrderId, OrderConfirmationView, OrderIdGenerator, OrderResult, RandomOrderIds,
    SequentialOrderIds,
};
