//! Cart store and its derived total.
//!
//! Every mutation goes through [`CartStore::recompute_total`], so the item
//! list and `total_price` never diverge once a mutation returns.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::cart::{CartView, EmptyCartView, HydratedLineItem, LineItem, LineItemView, TotalView};
use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::catalog::{ItemRef, ProductLookup, ProductRecord};
use crate::error::{CommerceError, LookupError};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// How product records are fetched during hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HydrationMode {
    /// One fetch at a time, in cart order.
    #[default]
    Sequential,
    /// All fetches in flight at once; results are merged back in cart order.
    Concurrent,
}

/// What hydration does when a single product fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole hydration and keep the previous cart state.
    #[default]
    Abort,
    /// Drop the failed item and keep going.
    #[serde(rename = "skip")]
    SkipFailed,
}

/// An item dropped during hydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Product that could not be hydrated.
    pub id: ProductId,
    /// Why the lookup failed.
    pub reason: String,
}

/// Outcome of a successful hydration pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HydrationReport {
    /// Number of lines now in the cart.
    pub hydrated: usize,
    /// Items dropped under [`FailurePolicy::SkipFailed`].
    pub skipped: Vec<SkippedItem>,
}

impl HydrationReport {
    /// Check if every reference made it into the cart.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Snapshot of the cart as the rendering layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    /// Hydrated line items, in cart order.
    pub items: Vec<HydratedLineItem>,
    /// Symbol printed before amounts.
    pub currency_symbol: String,
    /// Sum of `quantity * unit_price` over `items`.
    pub total_price: Money,
}

impl CartState {
    fn empty(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency_symbol: currency.symbol().to_string(),
            total_price: Money::zero(currency),
        }
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Settled,
}

/// In-memory cart for one user session.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: CartState,
    currency: Currency,
    mode: HydrationMode,
    policy: FailurePolicy,
    phase: Phase,
}

impl CartStore {
    /// Create an empty, not yet hydrated cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CartState::empty(currency),
            currency,
            mode: HydrationMode::default(),
            policy: FailurePolicy::default(),
            phase: Phase::Loading,
        }
    }

    /// Set the hydration fetch strategy.
    pub fn with_hydration_mode(mut self, mode: HydrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the partial-failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[HydratedLineItem] {
        &self.state.items
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Check if at least one hydration (or a reset) has completed.
    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.state.items.iter().map(HydratedLineItem::quantity).sum()
    }

    /// Get the first line for a product.
    pub fn get_item(&self, id: &ProductId) -> Option<&HydratedLineItem> {
        self.state.items.iter().find(|item| item.id() == id)
    }

    /// Bare references for persisting the cart between sessions.
    pub fn item_refs(&self) -> Vec<ItemRef> {
        self.state
            .items
            .iter()
            .map(|item| ItemRef::new(item.id().clone(), item.quantity()))
            .collect()
    }

    /// Replace the cart contents with freshly fetched products.
    ///
    /// Each reference is looked up through `lookup` and merged with its
    /// stored quantity (1 when absent or not positive, capped at
    /// `MAX_QUANTITY_PER_ITEM`). Under
    /// [`FailurePolicy::Abort`] the first failed lookup fails the whole pass
    /// and the previous state is kept; under [`FailurePolicy::SkipFailed`]
    /// failed items are left out and listed in the report.
    pub async fn hydrate<L>(
        &mut self,
        lookup: &L,
        refs: &[ItemRef],
    ) -> Result<HydrationReport, CommerceError>
    where
        L: ProductLookup + ?Sized,
    {
        debug!(items = refs.len(), mode = ?self.mode, "hydrating cart");

        let stop_early = self.policy == FailurePolicy::Abort;
        let fetched = fetch_records(lookup, refs, self.mode, stop_early).await;

        let mut items = Vec::with_capacity(refs.len());
        let mut skipped = Vec::new();

        for (item_ref, result) in refs.iter().zip(fetched) {
            let quantity = stored_quantity(item_ref.quantity);
            if item_ref.quantity.is_some_and(|q| q > MAX_QUANTITY_PER_ITEM) {
                warn!(
                    product_id = %item_ref.id,
                    stored = ?item_ref.quantity,
                    quantity,
                    "stored quantity above limit, capped"
                );
            }
            let hydrated = result.and_then(|record| {
                HydratedLineItem::from_record(record, quantity, self.currency)
            });

            match hydrated {
                Ok(item) => items.push(item),
                Err(err) => match self.policy {
                    FailurePolicy::Abort => {
                        warn!(product_id = %item_ref.id, error = %err, "hydration aborted");
                        return Err(err.into());
                    }
                    FailurePolicy::SkipFailed => {
                        warn!(product_id = %item_ref.id, error = %err, "skipping cart item");
                        skipped.push(SkippedItem {
                            id: item_ref.id.clone(),
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }

        let total = compute_total(&items, self.currency).ok_or(CommerceError::Overflow)?;
        self.state.items = items;
        self.state.total_price = total;
        self.phase = Phase::Settled;

        info!(
            lines = self.state.items.len(),
            skipped = skipped.len(),
            total = %total,
            "cart hydrated"
        );

        Ok(HydrationReport {
            hydrated: self.state.items.len(),
            skipped,
        })
    }

    /// Set the quantity of the first line for `id`.
    ///
    /// Unknown ids, quantities outside `1..=MAX_QUANTITY_PER_ITEM` and
    /// updates whose total would overflow are ignored. Returns whether the
    /// update was applied.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if !LineItem::is_valid_quantity(quantity) {
            debug!(product_id = %id, quantity, "ignoring out-of-range quantity");
            return false;
        }
        let Some(index) = self.position(id) else {
            debug!(product_id = %id, "ignoring quantity update for unknown item");
            return false;
        };

        let previous = std::mem::replace(&mut self.state.items[index].line.quantity, quantity);
        if let Err(err) = self.recompute_total() {
            warn!(product_id = %id, quantity, error = %err, "quantity update rejected");
            self.state.items[index].line.quantity = previous;
            return false;
        }
        true
    }

    /// Remove the first line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            debug!(product_id = %id, "ignoring removal of unknown item");
            return false;
        };

        self.state.items.remove(index);
        // Dropping a line from a sum of non-negative amounts cannot overflow.
        if let Err(err) = self.recompute_total() {
            error!(error = %err, "cart total diverged after removal");
        }
        true
    }

    /// Recompute `total_price` from the current items.
    ///
    /// On overflow the stored total is left as it was.
    pub fn recompute_total(&mut self) -> Result<Money, CommerceError> {
        let total =
            compute_total(&self.state.items, self.currency).ok_or(CommerceError::Overflow)?;
        self.state.total_price = total;
        Ok(total)
    }

    /// Empty the cart and zero the total.
    pub fn reset(&mut self) {
        self.state = CartState::empty(self.currency);
        self.phase = Phase::Settled;
    }

    /// Display directive for the current state.
    pub fn view(&self) -> CartView {
        match self.phase {
            Phase::Loading => CartView::Loading,
            Phase::Settled if self.is_empty() => CartView::Empty(EmptyCartView::default()),
            Phase::Settled => CartView::Items {
                lines: self.state.items.iter().map(LineItemView::from).collect(),
                total: self.total_view(),
            },
        }
    }

    /// Total bar shown under the cart, also for an empty cart.
    pub fn total_view(&self) -> TotalView {
        TotalView {
            currency: self.state.currency_symbol.clone(),
            amount: self.state.total_price,
        }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.state.items.iter().position(|item| item.id() == id)
    }
}

/// Quantity a reference contributes to the cart.
fn stored_quantity(quantity: Option<i64>) -> i64 {
    match quantity {
        Some(q) if q >= 1 => q.min(MAX_QUANTITY_PER_ITEM),
        _ => 1,
    }
}

/// Sum of line totals, `None` on overflow.
fn compute_total(items: &[HydratedLineItem], currency: Currency) -> Option<Money> {
    items.iter().try_fold(Money::zero(currency), |acc, item| {
        acc.checked_add(&item.line.line_total()?)
    })
}

/// Fetch a record per reference, returned in reference order.
///
/// In sequential mode with `stop_early`, fetching stops after the first
/// failure, so the result may be shorter than `refs`.
async fn fetch_records<L>(
    lookup: &L,
    refs: &[ItemRef],
    mode: HydrationMode,
    stop_early: bool,
) -> Vec<Result<ProductRecord, LookupError>>
where
    L: ProductLookup + ?Sized,
{
    match mode {
        HydrationMode::Sequential => {
            let mut results = Vec::with_capacity(refs.len());
            for item_ref in refs {
                debug!(product_id = %item_ref.id, "fetching product");
                let result = lookup.fetch_product(&item_ref.id).await;
                let failed = result.is_err();
                results.push(result);
                if failed && stop_early {
                    break;
                }
            }
            results
        }
        HydrationMode::Concurrent => {
            join_all(refs.iter().map(|item_ref| {
                debug!(product_id = %item_ref.id, "fetching product");
                lookup.fetch_product(&item_ref.id)
            }))
            .await
        }
    }
}
