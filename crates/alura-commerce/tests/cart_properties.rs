//! Property tests for the cart state machine and its persistence.

use std::collections::HashSet;
use std::sync::Arc;

use alura_cache::{Cache, MemoryBackend};
use alura_commerce::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Update(u32, i64),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    // Ids 100..=107 include products missing from the catalog (100, 107).
    prop_oneof![
        6 => (100u32..=107).prop_map(Op::Add),
        6 => ((100u32..=107), -4i64..=4).prop_map(|(id, d)| Op::Update(id, d)),
        1 => Just(Op::Clear),
    ]
}

fn apply(store: &mut CartStore, op: &Op) {
    match *op {
        Op::Add(id) => {
            store.add_item(ProductId::new(id));
        }
        Op::Update(id, delta) => {
            store.update_quantity(ProductId::new(id), delta);
        }
        Op::Clear => store.clear(),
    }
}

fn open(backend: &MemoryBackend) -> CartStore {
    CartStore::open(
        Arc::new(Catalog::alura_collection()),
        Cache::new(backend.clone()),
        DEFAULT_CART_KEY,
    )
}

proptest! {
    #[test]
    fn lines_stay_unique_and_positive(ops in prop::collection::vec(op(), 0..64)) {
        let mut store = open(&MemoryBackend::new());
        for op in &ops {
            apply(&mut store, op);

            let lines = store.cart().lines();
            let ids: HashSet<_> = lines.iter().map(|l| l.id).collect();
            prop_assert_eq!(ids.len(), lines.len());
            prop_assert!(lines.iter().all(|l| l.quantity > 0));
        }
    }

    #[test]
    fn derived_values_match_lines(ops in prop::collection::vec(op(), 0..64)) {
        let catalog = Catalog::alura_collection();
        let mut store = open(&MemoryBackend::new());
        for op in &ops {
            apply(&mut store, op);
        }

        let lines = store.cart().lines();
        let count: u64 = lines.iter().map(|l| u64::from(l.quantity)).sum();
        prop_assert_eq!(store.item_count(), count);

        let subtotal: i64 = lines
            .iter()
            .filter_map(|l| catalog.get(l.id).map(|p| p.price.amount_cents * i64::from(l.quantity)))
            .sum();
        prop_assert_eq!(store.subtotal(), Money::new(subtotal));
    }

    #[test]
    fn zero_delta_never_changes_state(ops in prop::collection::vec(op(), 0..32), id in 100u32..=107) {
        let mut store = open(&MemoryBackend::new());
        for op in &ops {
            apply(&mut store, op);
        }

        let before = store.cart().clone();
        prop_assert!(!store.update_quantity(ProductId::new(id), 0));
        prop_assert_eq!(store.cart(), &before);
    }

    #[test]
    fn reload_reproduces_cart(ops in prop::collection::vec(op(), 0..64)) {
        let backend = MemoryBackend::new();
        let mut store = open(&backend);
        for op in &ops {
            apply(&mut store, op);
        }

        let reloaded = open(&backend);
        prop_assert_eq!(reloaded.cart(), store.cart());
    }
}
