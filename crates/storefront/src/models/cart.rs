//! Per-visitor shopping cart.
//!
//! The cart lives in the visitor's session under [`session_keys::CART`]
//! and is loaded, mutated and saved back by the cart handlers.
//!
//! [`session_keys::CART`]: super::session_keys::CART

use aitoy_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};

/// Sales tax applied at checkout (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Order summary shown beside the cart. Shipping is always free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Decimal,
    /// Subtotal × [`TAX_RATE`], rounded to cents.
    pub tax: Decimal,
    pub total: Decimal,
}

/// One product and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the line (unit price × quantity).
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered cart lines, unique by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    pub fn add_to_cart(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Remove the line for `id`; no-op if absent.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.lines.retain(|l| &l.product.id != id);
    }

    /// Set the quantity for `id`.
    ///
    /// Zero or negative removes the line. Values above `u32::MAX` saturate.
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of line prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_price().amount).sum()
    }

    /// Subtotal, tax and total.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.total_price();
        let tax = (subtotal * TAX_RATE).round_dp(2);
        CartSummary {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop lines whose product is no longer in `catalog`.
    ///
    /// Returns how many lines were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| catalog.find(&l.product.id).is_some());
        before - self.lines.len()
    }
}
