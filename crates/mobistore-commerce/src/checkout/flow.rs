//! Checkout flow state machine.
//!
//! ```text
//! Idle ──place_order──► AuthCheck ──authenticated──► OrderPlaced
//!                           │
//!                           └──not authenticated──► RedirectToLogin
//! ```
//!
//! Both outcomes are terminal: one flow instance places at most one order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::CartStore;
use crate::checkout::{OrderConfirmationView, OrderIdGenerator, OrderResult, RandomOrderIds};
use crate::error::CommerceError;
use crate::navigation::{NavigationDirective, CART_PATH};

/// Session-authentication collaborator.
///
/// Reads local session state only; no I/O happens behind this call.
pub trait AuthContext {
    /// Check if the current session belongs to a logged-in user.
    fn is_authenticated(&self) -> bool;
}

impl<T: AuthContext + ?Sized> AuthContext for &T {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

impl<T: AuthContext + ?Sized> AuthContext for Arc<T> {
    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }
}

/// States of a checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutState {
    /// Waiting for the user to place the order.
    Idle,
    /// Consulting the session.
    AuthCheck,
    /// Order placed and cart cleared.
    OrderPlaced(OrderResult),
    /// User must log in first.
    RedirectToLogin(NavigationDirective),
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::AuthCheck => "auth_check",
            CheckoutState::OrderPlaced(_) => "order_placed",
            CheckoutState::RedirectToLogin(_) => "redirect_to_login",
        }
    }

    /// Check if the flow has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CheckoutState::OrderPlaced(_) | CheckoutState::RedirectToLogin(_)
        )
    }
}

/// What the caller should do after `place_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// Show the confirmation.
    Placed(OrderConfirmationView),
    /// Navigate away (to the login page).
    Redirect(NavigationDirective),
}

/// Gates order placement on the session's authentication state.
#[derive(Debug)]
pub struct CheckoutFlow<A, G = RandomOrderIds> {
    auth: A,
    order_ids: G,
    state: CheckoutState,
}

impl<A: AuthContext> CheckoutFlow<A, RandomOrderIds> {
    /// Flow with randomly generated order ids.
    pub fn with_random_ids(auth: A) -> Self {
        Self::new(auth, RandomOrderIds)
    }
}

impl<A: AuthContext, G: OrderIdGenerator> CheckoutFlow<A, G> {
    /// Create a flow in the `Idle` state.
    pub fn new(auth: A, order_ids: G) -> Self {
        Self {
            auth,
            order_ids,
            state: CheckoutState::Idle,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Try to place an order for everything in `cart`.
    ///
    /// An unauthenticated session yields a redirect to
    /// `/login?returnUrl=/cart` and leaves the cart untouched. An
    /// authenticated one gets a fresh order id and the cart is reset.
    pub fn place_order(&mut self, cart: &mut CartStore) -> Result<CheckoutOutcome, CommerceError> {
        if self.state != CheckoutState::Idle {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: CheckoutState::AuthCheck.as_str().to_string(),
            });
        }
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        self.state = CheckoutState::AuthCheck;

        if !self.auth.is_authenticated() {
            let directive = NavigationDirective::login_redirect(CART_PATH);
            info!(redirect = %directive, "checkout requires login");
            self.state = CheckoutState::RedirectToLogin(directive.clone());
            return Ok(CheckoutOutcome::Redirect(directive));
        }

        let order = OrderResult {
            order_id: self.order_ids.next_id(),
        };
        let total = cart.total_price();
        cart.reset();
        self.state = CheckoutState::OrderPlaced(order);

        info!(order_id = %order.order_id, total = %total, "order placed");
        Ok(CheckoutOutcome::Placed(OrderConfirmationView::new(order, total)))
    }
}
