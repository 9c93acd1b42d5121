//! Property tests for the session cart.
//!
//! Arbitrary add/remove/update sequences must leave the cart with:
//!
//! 1. `total_items()` equal to the sum of line quantities
//! 2. every line quantity at least 1
//! 3. at most one line per product id

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;

use aitoy_core::ProductId;
use aitoy_storefront::{catalog::Catalog, models::Cart};
use proptest::prelude::*;

/// Index past the catalog end, standing for an id the catalog never had.
const UNKNOWN: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Update(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..UNKNOWN).prop_map(Op::Add),
        (0usize..=UNKNOWN).prop_map(Op::Remove),
        (0usize..=UNKNOWN, any::<i64>()).prop_map(|(i, q)| Op::Update(i, q)),
        (0usize..=UNKNOWN, -3i64..6).prop_map(|(i, q)| Op::Update(i, q)),
    ]
}

fn product_id(catalog: &Catalog, index: usize) -> ProductId {
    catalog
        .all()
        .get(index)
        .map_or_else(|| ProductId::from("missing"), |p| p.id.clone())
}

fn apply(cart: &mut Cart, catalog: &Catalog, op: &Op) {
    match op {
        Op::Add(i) => cart.add_to_cart(&catalog.all()[*i]),
        Op::Remove(i) => cart.remove_from_cart(&product_id(catalog, *i)),
        Op::Update(i, q) => cart.update_quantity(&product_id(catalog, *i), *q),
    }
}

fn assert_invariants(cart: &Cart) -> Result<(), TestCaseError> {
    let sum = cart
        .lines()
        .iter()
        .fold(0_u32, |acc, l| acc.saturating_add(l.quantity));
    prop_assert_eq!(cart.total_items(), sum);

    for line in cart.lines() {
        prop_assert!(line.quantity >= 1, "line {} has quantity 0", line.product.id);
    }

    let mut seen = HashSet::new();
    for line in cart.lines() {
        prop_assert!(
            seen.insert(line.product.id.clone()),
            "duplicate line for {}",
            line.product.id
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_after_every_op(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for op in &ops {
            apply(&mut cart, &catalog, op);
            assert_invariants(&cart)?;
        }
    }

    #[test]
    fn non_positive_update_removes_line(index in 0usize..UNKNOWN, quantity in i64::MIN..=0) {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        cart.add_to_cart(&catalog.all()[index]);
        cart.update_quantity(&product_id(&catalog, index), quantity);
        prop_assert!(cart.is_empty());
        prop_assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn clear_always_empties(ops in prop::collection::vec(op_strategy(), 0..32)) {
        let catalog = Catalog::builtin();
        let mut cart = Cart::new();
        for op in &ops {
            apply(&mut cart, &catalog, op);
        }
        cart.clear_cart();
        prop_assert!(cart.is_empty());
        prop_assert_eq!(cart.total_items(), 0);
    }
}
