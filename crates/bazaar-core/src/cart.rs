//! # Cart Reconciliation
//!
//! The cart state machine: one ordered collection of line items, mutated
//! through two call shapes that both normalize to the same invariants.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Operation                Cart Change          │
//! │  ─────────────────        ─────────                ───────────          │
//! │                                                                         │
//! │  Shop grid "Add" ───────► add_or_adjust(p, +n) ──► merge or append     │
//! │                                                                         │
//! │  Sidebar [+] / [-] ─────► add_or_adjust(p, ±1) ──► adjust, remove at 0 │
//! │                                                                         │
//! │  Sidebar trash ─────────► remove_line(id) ───────► drop the line       │
//! │                                                                         │
//! │  Checkout qty field ────► set_quantity(id, n) ───► absolute set        │
//! │                                                                         │
//! │  Order confirmed ───────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  Any page ──────────────► snapshot() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per `product_id` after every mutation
//! - No line rests at `quantity <= 0`; driving a quantity to zero or below
//!   removes the line entirely
//! - First-time adds append; updates keep the line's original position
//!
//! These rules replace the per-page merge logic the storefront used to
//! duplicate: the shop grid, the cart sidebar and the checkout page all go
//! through the same two mutation shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CatalogProduct, ChargePolicy};

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the catalog record (for lookups upstream)
/// - Everything else is a frozen copy taken at insertion time. The cart
///   displays consistent data even if the catalog record changes after the
///   item was added; a catalog price change does not reprice the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Opaque product identifier.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in paise at time of adding (frozen).
    /// This is critical: we lock in the price when added to cart.
    pub unit_price_paise: i64,

    /// Quantity in cart. Always >= 1 while the line exists.
    pub quantity: i64,

    /// Image reference at time of adding (frozen, display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category at time of adding (frozen, display only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// When this line first entered the cart.
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a new line from a catalog record and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes
    /// afterwards, this line retains the original price.
    pub fn from_product(product: &CatalogProduct, quantity: i64) -> Self {
        LineItem {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            unit_price_paise: product.unit_price_paise,
            quantity,
            image: product.image.clone(),
            category: product.category.clone(),
            added_at: Utc::now(),
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Line total in paise.
    #[inline]
    pub fn line_total_paise(&self) -> i64 {
        self.unit_price_paise * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Quantity is always > 0 (a mutation reaching 0 removes the line)
/// - Insertion order is preserved; adjustments do not move a line
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, in insertion order.
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Rebuilds a cart from stored lines, re-applying the invariants.
    ///
    /// ## Why Normalize?
    /// The persisted snapshot is untrusted input: it may come from an older
    /// build or a hand-edited store. Lines with non-positive quantities are
    /// dropped and duplicate ids are merged into the first occurrence, so a
    /// rehydrated cart satisfies the same invariants as a live one.
    pub fn from_lines(lines: Vec<LineItem>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity <= 0 {
                continue;
            }
            match cart.position(&line.product_id) {
                Some(idx) => cart.lines[idx].quantity += line.quantity,
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Applies a relative quantity change for a product.
    ///
    /// ## Behavior
    /// - `delta == 0`: no-op
    /// - Line exists: quantity becomes `q + delta`; if the result is <= 0
    ///   the line is removed
    /// - No line and `delta > 0`: a new line is appended with
    ///   `quantity = delta`, metadata copied from the catalog record
    /// - No line and `delta <= 0`: silent no-op (nothing to remove)
    pub fn add_or_adjust(&mut self, product: &CatalogProduct, delta: i64) {
        if delta == 0 {
            return;
        }

        if let Some(idx) = self.position(&product.product_id) {
            let new_qty = self.lines[idx].quantity + delta;
            if new_qty <= 0 {
                self.lines.remove(idx);
            } else {
                self.lines[idx].quantity = new_qty;
            }
            return;
        }

        if delta > 0 {
            self.lines.push(LineItem::from_product(product, delta));
        }
    }

    /// Sets a line's quantity to an absolute value.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line if present; absence is a no-op,
    ///   not an error
    /// - `quantity > 0` on an existing line: sets it exactly (idempotent)
    ///
    /// ## Precondition
    /// A positive quantity for an id that is not in the cart requires full
    /// product data, which this call shape does not carry; creation must go
    /// through [`Cart::add_or_adjust`]. Violating the precondition is a
    /// no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|l| l.product_id != product_id);
            return;
        }

        if let Some(idx) = self.position(product_id) {
            self.lines[idx].quantity = quantity;
        }
    }

    /// Removes a line from the cart by product id.
    ///
    /// Equivalent to `set_quantity(product_id, 0)`.
    pub fn remove_line(&mut self, product_id: &str) {
        self.set_quantity(product_id, 0);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the lines in insertion order.
    #[inline]
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Looks up a line by product id.
    pub fn line(&self, product_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines in the cart.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the items total (sum of line totals, before charges).
    pub fn items_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, l| acc + l.line_total())
    }

    /// Computes the derived totals under the given charge policy.
    ///
    /// Totals are never stored; they are recomputed from the lines on every
    /// call so they cannot drift from the collection.
    pub fn totals(&self, charges: &ChargePolicy) -> CartTotals {
        let items_total = self.items_total();
        let grand_total = items_total + charges.delivery() + charges.handling();

        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            items_total_paise: items_total.paise(),
            delivery_charge_paise: charges.delivery_paise,
            handling_charge_paise: charges.handling_paise,
            grand_total_paise: grand_total.paise(),
        }
    }

    /// Returns a read-only snapshot: the ordered lines plus derived totals.
    ///
    /// This is the exact view the checkout consumer builds an order request
    /// from; the totals here and the totals shown in the cart sidebar come
    /// from the same computation.
    pub fn snapshot(&self, charges: &ChargePolicy) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            totals: self.totals(charges),
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

// =============================================================================
// Derived Views
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub items_total_paise: i64,
    pub delivery_charge_paise: i64,
    pub handling_charge_paise: i64,
    pub grand_total_paise: i64,
}

impl CartTotals {
    /// Items total as Money.
    #[inline]
    pub fn items_total(&self) -> Money {
        Money::from_paise(self.items_total_paise)
    }

    /// Grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }
}

/// Read-only view of the cart contents plus computed totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<LineItem>,
    pub totals: CartTotals,
}

impl CartSnapshot {
    /// Checks if the snapshot holds no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_paise: i64) -> CatalogProduct {
        CatalogProduct::new(id, format!("Product {}", id), price_paise)
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = Cart::new();
        let rice = CatalogProduct::new("A", "Rice", 5000);

        cart.add_or_adjust(&rice, 2);

        assert_eq!(cart.line_count(), 1);
        let line = cart.line("A").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.items_total().paise(), 10_000);
    }

    #[test]
    fn test_adjust_merges_into_existing_line() {
        let mut cart = Cart::new();
        let rice = CatalogProduct::new("A", "Rice", 5000);

        cart.add_or_adjust(&rice, 2);
        cart.add_or_adjust(&rice, 1);

        assert_eq!(cart.line_count(), 1); // still one line
        assert_eq!(cart.line("A").unwrap().quantity, 3);
        assert_eq!(cart.items_total().paise(), 15_000);
    }

    #[test]
    fn test_negative_adjust_to_zero_removes_line() {
        let mut cart = Cart::new();
        let rice = CatalogProduct::new("A", "Rice", 5000);

        cart.add_or_adjust(&rice, 3);
        cart.add_or_adjust(&rice, -3);

        assert!(cart.is_empty());
        assert_eq!(cart.items_total().paise(), 0);
    }

    #[test]
    fn test_negative_adjust_below_zero_removes_line() {
        let mut cart = Cart::new();
        let rice = product("A", 5000);

        cart.add_or_adjust(&rice, 2);
        cart.add_or_adjust(&rice, -5);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let mut cart = Cart::new();
        let rice = product("A", 5000);

        cart.add_or_adjust(&rice, 2);
        cart.add_or_adjust(&rice, 0);

        assert_eq!(cart.line("A").unwrap().quantity, 2);
    }

    #[test]
    fn test_negative_adjust_on_missing_line_is_noop() {
        let mut cart = Cart::new();
        let rice = product("A", 5000);

        cart.add_or_adjust(&rice, -1);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_with_charges() {
        // A at ₹50 × 2 plus B at ₹30 × 1, delivery ₹25, handling ₹2.
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 2);
        cart.add_or_adjust(&product("B", 3000), 1);

        let totals = cart.totals(&ChargePolicy::new(2500, 200));

        assert_eq!(totals.items_total_paise, 13_000);
        assert_eq!(totals.delivery_charge_paise, 2500);
        assert_eq!(totals.handling_charge_paise, 200);
        assert_eq!(totals.grand_total_paise, 15_700);
    }

    #[test]
    fn test_set_quantity_exact_and_idempotent() {
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 2);

        cart.set_quantity("A", 7);
        let first = cart.snapshot(&ChargePolicy::free());

        cart.set_quantity("A", 7);
        let second = cart.snapshot(&ChargePolicy::free());

        assert_eq!(first.totals, second.totals);
        assert_eq!(cart.line("A").unwrap().quantity, 7);
    }

    #[test]
    fn test_set_quantity_zero_removes_then_noop() {
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 2);

        cart.set_quantity("A", 0);
        assert!(cart.is_empty());

        // Absence is a no-op, not an error.
        cart.set_quantity("A", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_untracked_id_is_noop() {
        // Positive set without product data violates the documented
        // precondition; the cart must not invent a line from thin air.
        let mut cart = Cart::new();
        cart.set_quantity("ghost", 4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_line_matches_set_zero() {
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 2);
        cart.add_or_adjust(&product("B", 3000), 1);

        cart.remove_line("A");

        assert_eq!(cart.line_count(), 1);
        assert!(cart.line("A").is_none());
        assert!(cart.line("B").is_some());
    }

    #[test]
    fn test_updates_preserve_position() {
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 1);
        cart.add_or_adjust(&product("B", 3000), 1);
        cart.add_or_adjust(&product("C", 1000), 1);

        // Adjusting A must not move it to the back.
        cart.add_or_adjust(&product("A", 5000), 4);
        cart.set_quantity("B", 9);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_uniqueness_under_mixed_sequences() {
        let mut cart = Cart::new();
        let a = product("A", 5000);
        let b = product("B", 3000);

        cart.add_or_adjust(&a, 2);
        cart.add_or_adjust(&b, 1);
        cart.add_or_adjust(&a, -1);
        cart.set_quantity("A", 5);
        cart.add_or_adjust(&a, 3);
        cart.set_quantity("B", 2);

        let mut ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.line_count());
        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        assert_eq!(cart.line("A").unwrap().quantity, 8);
    }

    #[test]
    fn test_price_frozen_at_insertion() {
        let mut cart = Cart::new();
        let mut rice = product("A", 5000);
        cart.add_or_adjust(&rice, 1);

        // Catalog price changes; the existing line keeps the old price.
        rice.unit_price_paise = 9999;
        cart.add_or_adjust(&rice, 1);

        assert_eq!(cart.line("A").unwrap().unit_price_paise, 5000);
        assert_eq!(cart.items_total().paise(), 10_000);
    }

    #[test]
    fn test_clear_is_total() {
        let mut cart = Cart::new();
        cart.add_or_adjust(&product("A", 5000), 2);
        assert!(!cart.is_empty());

        cart.clear();

        let snapshot = cart.snapshot(&ChargePolicy::free());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.totals.items_total_paise, 0);
        assert_eq!(snapshot.totals.total_quantity, 0);
    }

    #[test]
    fn test_from_lines_drops_nonpositive_and_merges_duplicates() {
        let a1 = LineItem::from_product(&product("A", 5000), 2);
        let bad = LineItem::from_product(&product("B", 3000), 0);
        let a2 = LineItem::from_product(&product("A", 5000), 3);
        let c = LineItem::from_product(&product("C", 1000), 1);

        let cart = Cart::from_lines(vec![a1, bad, a2, c]);

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.line("A").unwrap().quantity, 5);
        assert!(cart.line("B").is_none());
        assert_eq!(cart.line("C").unwrap().quantity, 1);
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let mut cart = Cart::new();
        cart.add_or_adjust(
            &product("A", 5000).with_category("Fruits").with_image("a.png"),
            2,
        );

        let payload = serde_json::to_string(cart.lines()).unwrap();
        let lines: Vec<LineItem> = serde_json::from_str(&payload).unwrap();
        let restored = Cart::from_lines(lines);

        assert_eq!(restored.line_count(), 1);
        let line = restored.line("A").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.category.as_deref(), Some("Fruits"));
        assert_eq!(restored.items_total().paise(), 10_000);
    }
}
