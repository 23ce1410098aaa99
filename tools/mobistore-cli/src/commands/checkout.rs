//! Checkout command.

use anyhow::{Context as _, Result};
use mobistore_commerce::checkout::{AuthContext, CheckoutFlow, CheckoutOutcome};
use mobistore_commerce::navigation::CART_PATH;
use mobistore_router::{HistoryNavigator, Navigator};
use tracing::debug;

use super::cart::load_cart;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut cart = load_cart(ctx).await?;
    let session = ctx.load_session()?;

    debug!(
        authenticated = session.is_authenticated(),
        lines = cart.store.items().len(),
        "starting checkout"
    );
    let mut flow = CheckoutFlow::with_random_ids(&session);
    let outcome = flow
        .place_order(&mut cart.store)
        .context("Checkout failed")?;
    debug!(state = flow.state().as_str(), "checkout finished");

    if let CheckoutOutcome::Placed(_) = &outcome {
        // Items hydration skipped were not part of the order; keep them.
        ctx.cart_file().save(&cart.refs_to_persist())?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&outcome);
        return Ok(());
    }

    match outcome {
        CheckoutOutcome::Placed(confirmation) => {
            ctx.output.order_placed(&confirmation);
        }
        CheckoutOutcome::Redirect(directive) => {
            let mut navigator = HistoryNavigator::starting_at(CART_PATH);
            navigator.navigate(&directive);

            ctx.output.warn("You need to log in before placing an order");
            if let Some(url) = navigator.current() {
                ctx.output.redirect(CART_PATH, url);
            }
            ctx.output.info(&format!(
                "Run `mobistore login <user> --return-url {}` and try again",
                directive.return_url.as_deref().unwrap_or(CART_PATH)
            ));
        }
    }

    Ok(())
}
