//! In-memory cart model.
//!
//! A cart is a list of line items keyed by `(product, size, color)`. The
//! persisted `shop.cart_item` rows have the same key under a unique index, and
//! the storefront rebuilds a [`Cart`] from those rows to render pages and to
//! compute checkout totals.
//!
//! # Invariants
//!
//! - At most one line per [`LineKey`]; adding an existing key merges quantities.
//! - Every line has a quantity of at least 1. Setting a quantity of zero or
//!   less removes the line.
//! - Update and removal always match the full key, never a row id.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::locale::Localized;
use crate::types::ProductId;

/// Identity of a cart line: the same product in another size or color is a
/// different line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    /// Build a key from its parts.
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// One line item in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub key: LineKey,
    /// Product name in both languages, as loaded with the line.
    pub name: Localized<String>,
    /// Unit price at the time the line was loaded.
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity was zero or less and the line was removed.
    Removed,
    /// No line matched the key.
    Missing,
}

/// Subtotal, flat shipping, and grand total of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// A customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from loaded lines, merging any that share a key.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line);
        }
        cart
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.key == key)
    }

    /// Add a line, merging with an existing line that has the same key.
    ///
    /// On merge the quantities are summed and the product details (name,
    /// price, image) are replaced with the incoming ones. A line with quantity
    /// zero is ignored. Returns the resulting quantity for the key.
    pub fn add(&mut self, line: CartLine) -> u32 {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key == line.key) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            existing.name = line.name;
            existing.unit_price = line.unit_price;
            existing.image = line.image;
            return existing.quantity;
        }

        if line.quantity == 0 {
            return 0;
        }

        let quantity = line.quantity;
        self.lines.push(line);
        quantity
    }

    /// Set the quantity of the line matching `key`.
    ///
    /// A quantity of zero or less is the same as [`Cart::remove`].
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> QuantityChange {
        if quantity <= 0 {
            return if self.remove(key) {
                QuantityChange::Removed
            } else {
                QuantityChange::Missing
            };
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.lines.iter_mut().find(|l| &l.key == key) {
            Some(line) => {
                line.quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            None => QuantityChange::Missing,
        }
    }

    /// Remove the line matching `key`. Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.key != key);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus the flat shipping charge.
    #[must_use]
    pub fn totals(&self, shipping: Decimal) -> CartTotals {
        let subtotal = self.subtotal();
        CartTotals {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: i32, size: &str, color: &str, price: i64) -> CartLine {
        CartLine {
            key: LineKey::new(ProductId::new(product), size, color),
            name: Localized::new(format!("Product {product}"), format!("منتج {product}")),
            unit_price: Decimal::new(price, 0),
            image: None,
            quantity: 1,
        }
    }

    #[test]
    fn test_repeated_add_converges_to_one_line() {
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add(line(1, "M", "Black", 299));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.subtotal(), Decimal::new(897, 0));
    }

    #[test]
    fn test_add_returns_merged_quantity() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(line(1, "M", "Black", 10)), 1);
        assert_eq!(cart.add(line(1, "M", "Black", 10)), 2);
        assert_eq!(cart.add(line(1, "L", "Black", 10)), 1);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_add_refreshes_price_on_merge() {
        let mut cart = Cart::new();
        cart.add(line(1, "M", "Black", 100));
        cart.add(line(1, "M", "Black", 120));

        let merged = cart.get(&LineKey::new(ProductId::new(1), "M", "Black"));
        assert_eq!(merged.map(|l| l.unit_price), Some(Decimal::new(120, 0)));
        assert_eq!(cart.subtotal(), Decimal::new(240, 0));
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let mut cart = Cart::new();
        let mut empty = line(1, "M", "Black", 10);
        empty.quantity = 0;
        assert_eq!(cart.add(empty), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_distinct_keys_are_distinct_lines() {
        let cart = Cart::from_lines([
            line(1, "M", "Black", 10),
            line(1, "M", "Navy", 10),
            line(2, "M", "Black", 10),
        ]);
        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn test_remove_matches_full_key_only() {
        let mut cart = Cart::from_lines([
            line(1, "M", "Black", 10),
            line(1, "L", "Black", 10),
            line(1, "M", "Navy", 10),
        ]);

        assert!(cart.remove(&LineKey::new(ProductId::new(1), "M", "Black")));
        assert_eq!(cart.lines().len(), 2);
        assert!(
            cart.get(&LineKey::new(ProductId::new(1), "L", "Black"))
                .is_some()
        );
        assert!(
            cart.get(&LineKey::new(ProductId::new(1), "M", "Navy"))
                .is_some()
        );
        assert!(!cart.remove(&LineKey::new(ProductId::new(1), "M", "Black")));
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let key = LineKey::new(ProductId::new(1), "M", "Black");

        let mut zeroed = Cart::from_lines([line(1, "M", "Black", 10)]);
        assert_eq!(zeroed.set_quantity(&key, 0), QuantityChange::Removed);
        assert!(zeroed.is_empty());

        let mut negative = Cart::from_lines([line(1, "M", "Black", 10)]);
        assert_eq!(negative.set_quantity(&key, -4), QuantityChange::Removed);
        assert!(negative.is_empty());

        assert_eq!(negative.set_quantity(&key, 0), QuantityChange::Missing);
    }

    #[test]
    fn test_set_quantity_updates_matching_line() {
        let key = LineKey::new(ProductId::new(1), "M", "Black");
        let mut cart = Cart::from_lines([line(1, "M", "Black", 45), line(2, "S", "Rose", 10)]);

        assert_eq!(cart.set_quantity(&key, 4), QuantityChange::Updated(4));
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.subtotal(), Decimal::new(190, 0));

        let unknown = LineKey::new(ProductId::new(9), "M", "Black");
        assert_eq!(cart.set_quantity(&unknown, 2), QuantityChange::Missing);
    }

    #[test]
    fn test_totals_add_flat_shipping() {
        let mut cart = Cart::from_lines([line(1, "M", "Black", 299), line(2, "One Size", "Rose", 89)]);
        cart.set_quantity(&LineKey::new(ProductId::new(2), "One Size", "Rose"), 2);

        let totals = cart.totals(Decimal::new(25, 0));
        assert_eq!(totals.subtotal, Decimal::new(477, 0));
        assert_eq!(totals.shipping, Decimal::new(25, 0));
        assert_eq!(totals.total, Decimal::new(502, 0));
    }

    #[test]
    fn test_line_total_uses_decimal_arithmetic() {
        let mut item = line(1, "M", "Black", 0);
        item.unit_price = Decimal::new(1999, 2);
        item.quantity = 3;
        assert_eq!(item.line_total(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::from_lines([line(1, "M", "Black", 10)]);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
