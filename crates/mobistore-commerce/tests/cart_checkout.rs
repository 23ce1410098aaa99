//! End-to-end cart and checkout scenarios.

use std::collections::HashMap;

use async_trait::async_trait;
use mobistore_commerce::prelude::*;

struct Catalog(HashMap<&'static str, f64>);

impl Catalog {
    fn phones() -> Self {
        Self(HashMap::from([("m1", 500.0), ("m2", 129.99), ("m3", 0.0)]))
    }
}

#[async_trait]
impl ProductLookup for Catalog {
    async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
        self.0
            .get(id.as_str())
            .map(|price| {
                ProductRecord::new(id.clone(), format!("Mobile {}", id), *price)
                    .with_description("unlocked")
            })
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }
}

struct Session {
    logged_in: bool,
}

impl AuthContext for Session {
    fn is_authenticated(&self) -> bool {
        self.logged_in
    }
}

fn dollars(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::USD).unwrap()
}

fn sum_of_lines(cart: &CartStore) -> Money {
    let lines: Vec<Money> = cart
        .items()
        .iter()
        .map(|item| item.line.line_total().unwrap())
        .collect();
    Money::checked_sum(lines.iter(), cart.currency()).unwrap()
}

#[tokio::test]
async fn test_total_matches_lines_after_every_mutation() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(
        &Catalog::phones(),
        &[ItemRef::new("m1", 2), ItemRef::new("m2", 3), ItemRef::bare("m3")],
    )
    .await
    .unwrap();
    assert_eq!(cart.total_price(), sum_of_lines(&cart));

    cart.update_quantity(&ProductId::new("m2"), 1);
    assert_eq!(cart.total_price(), sum_of_lines(&cart));

    cart.remove_item(&ProductId::new("m1"));
    assert_eq!(cart.total_price(), sum_of_lines(&cart));
    assert_eq!(cart.total_price(), dollars(129.99));
}

#[tokio::test]
async fn test_reset_from_any_state() {
    let mut fresh = CartStore::new(Currency::USD);
    fresh.reset();
    assert!(fresh.is_empty() && fresh.total_price().is_zero());

    let mut full = CartStore::new(Currency::USD);
    full.hydrate(&Catalog::phones(), &[ItemRef::new("m1", 9)])
        .await
        .unwrap();
    full.reset();
    assert!(full.is_empty() && full.total_price().is_zero());
}

#[tokio::test]
async fn test_remove_absent_id_leaves_state_unchanged() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(&Catalog::phones(), &[ItemRef::new("m1", 1)])
        .await
        .unwrap();
    let before = cart.state().clone();

    assert!(!cart.remove_item(&ProductId::new("m404")));
    assert!(!cart.remove_item(&ProductId::new("m404")));
    assert_eq!(cart.state(), &before);
}

#[tokio::test]
async fn test_repeated_quantity_update_is_idempotent() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(&Catalog::phones(), &[ItemRef::new("m2", 1)])
        .await
        .unwrap();

    cart.update_quantity(&ProductId::new("m2"), 4);
    let once = cart.state().clone();
    cart.update_quantity(&ProductId::new("m2"), 4);
    assert_eq!(cart.state(), &once);
}

#[tokio::test]
async fn test_single_phone_scenario() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(&Catalog::phones(), &[ItemRef::new("m1", 2)])
        .await
        .unwrap();
    assert_eq!(cart.state().currency_symbol, "$");
    assert_eq!(cart.total_price(), dollars(1000.0));

    cart.update_quantity(&ProductId::new("m1"), 3);
    assert_eq!(cart.total_price(), dollars(1500.0));

    cart.remove_item(&ProductId::new("m1"));
    assert!(cart.total_price().is_zero());
    assert_eq!(cart.view(), CartView::Empty(EmptyCartView::default()));
}

#[tokio::test]
async fn test_checkout_logged_out_redirects_without_reset() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(&Catalog::phones(), &[ItemRef::new("m1", 3)])
        .await
        .unwrap();
    let before = cart.state().clone();

    let session = Session { logged_in: false };
    let mut flow = CheckoutFlow::with_random_ids(&session);
    let outcome = flow.place_order(&mut cart).unwrap();

    assert_eq!(
        outcome,
        CheckoutOutcome::Redirect(NavigationDirective::login_redirect("/cart"))
    );
    assert_eq!(cart.state(), &before);
}

#[tokio::test]
async fn test_checkout_logged_in_confirms_and_resets() {
    let mut cart = CartStore::new(Currency::USD);
    cart.hydrate(&Catalog::phones(), &[ItemRef::new("m1", 3)])
        .await
        .unwrap();
    assert_eq!(cart.total_price(), dollars(1500.0));

    let session = Session { logged_in: true };
    let mut flow = CheckoutFlow::with_random_ids(&session);

    match flow.place_order(&mut cart).unwrap() {
        CheckoutOutcome::Placed(view) => {
            let id = view.order_id.get();
            assert!((1..=1_000_000).contains(&id));
            assert_eq!(view.total, dollars(1500.0));
        }
        other => panic!("expected confirmation, got {:?}", other),
    }
    assert!(cart.is_empty());
    assert!(cart.total_price().is_zero());
}

#[tokio::test]
async fn test_concurrent_and_sequential_agree() {
    let refs = [ItemRef::new("m2", 2), ItemRef::bare("m1"), ItemRef::bare("m3")];

    let mut sequential = CartStore::new(Currency::USD);
    sequential.hydrate(&Catalog::phones(), &refs).await.unwrap();

    let mut concurrent = CartStore::new(Currency::USD).with_hydration_mode(HydrationMode::Concurrent);
    concurrent.hydrate(&Catalog::phones(), &refs).await.unwrap();

    assert_eq!(sequential.state(), concurrent.state());
}

mod properties {
    use super::*;
    use futures::executor::block_on;
    use proptest::prelude::*;

    /// Prices `p0`, `p1`, ... without a table.
    struct PriceList;

    #[async_trait]
    impl ProductLookup for PriceList {
        async fn fetch_product(&self, id: &ProductId) -> Result<ProductRecord, LookupError> {
            let n: u32 = id
                .as_str()
                .trim_start_matches('p')
                .parse()
                .map_err(|_| LookupError::NotFound(id.to_string()))?;
            Ok(ProductRecord::new(
                id.clone(),
                format!("Phone {}", n),
                f64::from(n) * 37.25 + 0.99,
            ))
        }
    }

    #[derive(Debug, Clone)]
    enum Mutation {
        Update(u32, i64),
        Remove(u32),
    }

    fn product(n: u32) -> ProductId {
        ProductId::new(format!("p{}", n))
    }

    fn cart_refs() -> impl Strategy<Value = Vec<ItemRef>> {
        prop::collection::vec((0..8u32, prop::option::of(-3i64..20_000)), 1..12).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .map(|(n, quantity)| ItemRef {
                        id: product(n),
                        quantity,
                    })
                    .collect()
            },
        )
    }

    fn mutation() -> impl Strategy<Value = Mutation> {
        prop_oneof![
            (0..8u32, -2i64..12_000).prop_map(|(n, q)| Mutation::Update(n, q)),
            (0..8u32).prop_map(Mutation::Remove),
        ]
    }

    fn hydrated(refs: &[ItemRef]) -> CartStore {
        let mut cart = CartStore::new(Currency::USD);
        block_on(cart.hydrate(&PriceList, refs)).unwrap();
        cart
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// The stored total equals the sum of line totals after every mutation.
        #[test]
        fn test_total_tracks_lines(
            refs in cart_refs(),
            mutations in prop::collection::vec(mutation(), 0..20)
        ) {
            let mut cart = hydrated(&refs);
            prop_assert_eq!(cart.items().len(), refs.len());
            prop_assert_eq!(cart.total_price(), sum_of_lines(&cart));

            for m in mutations {
                match m {
                    Mutation::Update(n, q) => {
                        cart.update_quantity(&product(n), q);
                    }
                    Mutation::Remove(n) => {
                        cart.remove_item(&product(n));
                    }
                }
                prop_assert_eq!(cart.total_price(), sum_of_lines(&cart));
            }

            let before = cart.total_price();
            prop_assert_eq!(cart.recompute_total().unwrap(), before);
        }

        /// Applying the same quantity update twice equals applying it once.
        #[test]
        fn test_quantity_update_idempotent(
            refs in cart_refs(),
            n in 0..8u32,
            quantity in -2i64..12_000
        ) {
            let mut cart = hydrated(&refs);
            cart.update_quantity(&product(n), quantity);
            let once = cart.state().clone();

            cart.update_quantity(&product(n), quantity);
            prop_assert_eq!(cart.state(), &once);
        }

        /// Removing an id that is not in the cart changes nothing.
        #[test]
        fn test_remove_absent_is_noop(refs in cart_refs()) {
            let mut cart = hydrated(&refs);
            let before = cart.state().clone();

            prop_assert!(!cart.remove_item(&ProductId::new("absent")));
            prop_assert_eq!(cart.state(), &before);
        }
    }
}
