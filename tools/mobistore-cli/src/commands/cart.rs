//! Cart commands.

use anyhow::{bail, Context as _, Result};
use mobistore_commerce::cart::{CartStore, CartView, HydrationReport};
use mobistore_commerce::catalog::ItemRef;
use mobistore_commerce::ids::ProductId;
use tracing::{debug, info};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::cart_file;
use crate::context::Context;

/// A hydrated cart together with what hydration left out.
pub struct LoadedCart {
    pub store: CartStore,
    pub report: HydrationReport,
    refs: Vec<ItemRef>,
}

impl LoadedCart {
    /// References to write back, in the order they were loaded.
    ///
    /// Hydrated lines carry their current quantity, skipped items keep
    /// their stored reference and removed lines are dropped.
    pub fn refs_to_persist(&self) -> Vec<ItemRef> {
        // Lines are the non-skipped references in load order, minus removals.
        let mut lines = self.store.items().iter().peekable();
        let mut refs = Vec::with_capacity(self.refs.len());

        for item_ref in &self.refs {
            if self.report.skipped.iter().any(|s| s.id == item_ref.id) {
                refs.push(item_ref.clone());
            } else if let Some(line) = lines.next_if(|line| line.id() == &item_ref.id) {
                refs.push(ItemRef::new(line.id().clone(), line.quantity()));
            }
        }
        refs
    }
}

/// Load the stored cart and hydrate it from the configured product source.
pub async fn load_cart(ctx: &Context) -> Result<LoadedCart> {
    let refs = ctx.cart_file().load()?;
    let lookup = ctx.product_lookup()?;
    let mut store = ctx.cart_store()?;

    debug!(items = refs.len(), file = %ctx.cart_file().path().display(), "loading cart");
    let spinner = ctx.output.spinner("Loading cart...");
    let result = store.hydrate(&*lookup, &refs).await;
    spinner.finish_and_clear();

    let report = result.context("Failed to load cart")?;
    info!(
        lines = report.hydrated,
        skipped = report.skipped.len(),
        total = %store.total_price(),
        "cart loaded"
    );
    for skipped in &report.skipped {
        ctx.output
            .warn(&format!("Skipped {}: {}", skipped.id, skipped.reason));
    }

    Ok(LoadedCart {
        store,
        report,
        refs,
    })
}

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let cart = load_cart(ctx).await?;
    print_view(ctx, &cart.store.view());
    Ok(())
}

/// Add a product reference, checking the product exists unless offline.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let file = ctx.cart_file();
    ctx.output
        .debug(&format!("Cart file {}", file.path().display()));
    let mut refs = file.load()?;
    let id = ProductId::new(args.id);

    if !args.offline {
        let lookup = ctx.product_lookup()?;
        let record = lookup
            .fetch_product(&id)
            .await
            .with_context(|| format!("Cannot add {}", id))?;
        debug!(product_id = %id, name = %record.name, "product exists");
    }

    let quantity = cart_file::add_item(&mut refs, id.clone(), args.quantity)?;
    file.save(&refs)?;

    if ctx.output.is_json() {
        ctx.output.json(&refs);
    } else {
        ctx.output
            .success(&format!("{} now in cart (quantity {})", id, quantity));
    }
    Ok(())
}

/// Change the quantity of a line.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut cart = load_cart(ctx).await?;
    let id = ProductId::new(args.id);

    if cart.store.get_item(&id).is_none() {
        bail!("{} is not in the cart", id);
    }
    if !cart.store.update_quantity(&id, args.quantity) {
        bail!("Quantity {} rejected for {}", args.quantity, id);
    }
    ctx.cart_file().save(&cart.refs_to_persist())?;

    ctx.output
        .success(&format!("Updated {} to quantity {}", id, args.quantity));
    print_view(ctx, &cart.store.view());
    Ok(())
}

/// Remove a line.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = load_cart(ctx).await?;
    let id = ProductId::new(args.id);

    if !cart.store.remove_item(&id) {
        bail!("{} is not in the cart", id);
    }
    ctx.cart_file().save(&cart.refs_to_persist())?;

    ctx.output.success(&format!("Removed {}", id));
    print_view(ctx, &cart.store.view());
    Ok(())
}

/// Render a cart view.
pub fn print_view(ctx: &Context, view: &CartView) {
    if ctx.output.is_json() {
        ctx.output.json(view);
        return;
    }

    match view {
        CartView::Loading => ctx.output.info("Loading cart..."),
        CartView::Empty(empty) => {
            ctx.output.info(&empty.message);
            ctx.output.kv("Continue shopping", &empty.shop_link);
        }
        CartView::Items { lines, total } => {
            ctx.output.header("Cart");
            for line in lines {
                ctx.output.cart_line(line);
            }
            ctx.output.cart_total(total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mobistore_commerce::cart::FailurePolicy;
    use mobistore_commerce::catalog::{ProductLookup, ProductRecord};
    use mobistore_commerce::{Currency, LookupError};

    /// Every product costs 10 except `b`, which cannot be fetched.
    struct FlakyLookup;

    #[async_trait]
    impl ProductLookup for FlakyLookup {
        async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
            if id.as_str() == "b" {
                return Err(LookupError::Transport("connection reset".to_string()));
            }
            Ok(ProductRecord::new(id.clone(), format!("Phone {}", id), 10.0))
        }
    }

    async fn loaded(refs: Vec<ItemRef>) -> LoadedCart {
        let mut store =
            CartStore::new(Currency::USD).with_failure_policy(FailurePolicy::SkipFailed);
        let report = store.hydrate(&FlakyLookup, &refs).await.unwrap();
        LoadedCart {
            store,
            report,
            refs,
        }
    }

    fn ids(refs: &[ItemRef]) -> Vec<&str> {
        refs.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_skipped_items_keep_their_position() {
        let cart = loaded(vec![
            ItemRef::bare("a"),
            ItemRef::new("b", 4),
            ItemRef::new("c", 2),
        ])
        .await;

        let refs = cart.refs_to_persist();
        assert_eq!(ids(&refs), vec!["a", "b", "c"]);
        assert_eq!(refs[1], ItemRef::new("b", 4));
    }

    #[tokio::test]
    async fn test_persist_after_update_and_remove() {
        let mut cart = loaded(vec![
            ItemRef::bare("a"),
            ItemRef::new("b", 4),
            ItemRef::new("c", 2),
            ItemRef::bare("d"),
        ])
        .await;

        assert!(cart.store.update_quantity(&ProductId::new("c"), 7));
        assert!(cart.store.remove_item(&ProductId::new("a")));

        assert_eq!(
            cart.refs_to_persist(),
            vec![
                ItemRef::new("b", 4),
                ItemRef::new("c", 7),
                ItemRef::new("d", 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_persist_after_reset_keeps_only_skipped() {
        let mut cart = loaded(vec![ItemRef::bare("a"), ItemRef::bare("b")]).await;
        cart.store.reset();

        assert_eq!(ids(&cart.refs_to_persist()), vec!["b"]);
    }
}
