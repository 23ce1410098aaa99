//! Order results and order id generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ids::OrderId;
use crate::money::Money;
use crate::navigation::PRODUCT_LIST_PATH;

/// Result of a placed order. Display-only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub order_id: OrderId,
}

/// Confirmation shown once an order is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmationView {
    pub order_id: OrderId,
    /// Amount the cart totalled when the order was placed.
    pub total: Money,
    pub shop_more_link: String,
}

impl OrderConfirmationView {
    pub fn new(order: OrderResult, total: Money) -> Self {
        Self {
            order_id: order.order_id,
            total,
            shop_more_link: PRODUCT_LIST_PATH.to_string(),
        }
    }

    /// Headline of the confirmation dialog.
    pub fn message(&self) -> String {
        format!("Successfully placed order with id: {}", self.order_id)
    }
}

/// Source of order identifiers.
pub trait OrderIdGenerator {
    /// Produce the id for the next order.
    fn next_id(&mut self) -> OrderId;
}

impl<G: OrderIdGenerator + ?Sized> OrderIdGenerator for &mut G {
    fn next_id(&mut self) -> OrderId {
        (**self).next_id()
    }
}

impl<G: OrderIdGenerator + ?Sized> OrderIdGenerator for Box<G> {
    fn next_id(&mut self) -> OrderId {
        (**self).next_id()
    }
}

/// Uniformly random ids in `[OrderId::MIN, OrderId::MAX]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOrderIds;

impl OrderIdGenerator for RandomOrderIds {
    fn next_id(&mut self) -> OrderId {
        let value = rand::thread_rng().gen_range(OrderId::MIN..=OrderId::MAX);
        OrderId::new(value).unwrap_or(OrderId::FIRST)
    }
}

/// Always hands out the same id.
#[derive(Debug, Clone, Copy)]
pub struct FixedOrderId(pub OrderId);

impl OrderIdGenerator for FixedOrderId {
    fn next_id(&mut self) -> OrderId {
        self.0
    }
}

/// Counts up from a starting id, wrapping back to `OrderId::MIN`.
#[derive(Debug, Clone, Copy)]
pub struct SequentialOrderIds {
    next: OrderId,
}

impl SequentialOrderIds {
    pub fn starting_at(first: OrderId) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialOrderIds {
    fn default() -> Self {
        Self::starting_at(OrderId::FIRST)
    }
}

impl OrderIdGenerator for SequentialOrderIds {
    fn next_id(&mut self) -> OrderId {
        let current = self.next;
        self.next = OrderId::new(current.get() + 1).unwrap_or(OrderId::FIRST);
        current
    }
}
