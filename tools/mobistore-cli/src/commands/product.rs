//! Product details command.

use anyhow::{bail, Context as _, Result};
use mobistore_commerce::checkout::AuthContext;
use mobistore_commerce::ids::ProductId;
use mobistore_commerce::Money;
use mobistore_router::{Resolution, Route, RouteTable};
use tracing::debug;

use super::ProductArgs;
use crate::context::Context;

/// Show the details page of one product.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let session = ctx.load_session()?;
    let id = details_id(&ctx.route_table(), &args.id, &session)?;
    let lookup = ctx.product_lookup()?;

    let spinner = ctx.output.spinner("Loading product...");
    let result = lookup.fetch_product(&id).await;
    spinner.finish_and_clear();

    let record = result.with_context(|| format!("Failed to load product {}", id))?;
    debug!(product_id = %id, "product loaded");

    if ctx.output.is_json() {
        ctx.output.json(&record);
        return Ok(());
    }

    let price = ctx
        .config
        .cart
        .currency()
        .and_then(|currency| Money::from_decimal(record.price, currency));
    ctx.output.product(&record, price);
    Ok(())
}

/// Resolve `/mobile/<id>` through the route table and return the product id.
///
/// Fails when the details page is guarded and the session is anonymous, or
/// when `id` does not form a valid details path.
pub fn details_id<A>(table: &RouteTable, id: &str, auth: &A) -> Result<ProductId>
where
    A: AuthContext + ?Sized,
{
    let path = format!("/mobile/{}", id);
    match table.resolve(&path, auth)? {
        Resolution::Render {
            route: Route::MobileDetails { id },
        } => Ok(id),
        Resolution::Redirect { to } => bail!("Log in to view this product: {}", to),
        Resolution::Render { route } => bail!("No product page for '{}' ({})", id, route),
    }
}
