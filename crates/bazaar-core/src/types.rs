//! # Domain Types
//!
//! Core domain types used throughout the Bazaar storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │   │  ChargePolicy   │   │ DeliveryDetails │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  delivery       │   │  name           │       │
//! │  │  name           │   │  handling       │   │  phone          │       │
//! │  │  unit_price     │   │  (flat, may be  │   │  address        │       │
//! │  │  stock/category │   │   zero)         │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Note
//! `product_id` is an OPAQUE string assigned by the upstream catalog API.
//! It is stable per product but follows the upstream id scheme, so it is
//! never parsed or validated as a UUID here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog Product
// =============================================================================

/// A product record supplied by the Catalog Provider.
///
/// The catalog is fetched by the storefront shell and handed to the engine
/// as a read-only list. The engine copies what it needs into the cart at
/// insertion time and never re-reads the catalog for existing lines, so a
/// later price change does not retroactively reprice a cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    /// Opaque unique identifier, stable per product.
    pub product_id: String,

    /// Display name shown in the shop grid and cart.
    pub name: String,

    /// Price in paise (smallest currency unit).
    pub unit_price_paise: i64,

    /// Units the seller currently has on hand.
    ///
    /// Carried for display only. The cart does NOT validate requested
    /// quantity against stock; inventory enforcement lives upstream.
    pub stock: i64,

    /// Storefront category ("Vegetables", "Fruits", ...).
    pub category: Option<String>,

    /// Image reference for the product card.
    pub image: Option<String>,

    /// Whether the product is currently offered for sale.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogProduct {
    /// Creates a minimal active product. Handy for tests and fixtures.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price_paise: i64) -> Self {
        CatalogProduct {
            product_id: product_id.into(),
            name: name.into(),
            unit_price_paise,
            stock: 0,
            category: None,
            image: None,
            is_active: true,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Builder-style category setter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder-style stock setter.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Builder-style image setter.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// =============================================================================
// Charge Policy
// =============================================================================

/// Flat order-level charges applied on top of the items total.
///
/// ## Policy, Not Data
/// These are configuration constants of the storefront (a neighbourhood
/// marketplace typically charges zero for both), not per-product values.
/// They are read from `StorefrontConfig` and passed into total computation
/// so the pure cart stays configuration-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChargePolicy {
    /// Delivery charge in paise.
    pub delivery_paise: i64,

    /// Handling charge in paise.
    pub handling_paise: i64,
}

impl ChargePolicy {
    /// Creates a charge policy from paise amounts.
    #[inline]
    pub const fn new(delivery_paise: i64, handling_paise: i64) -> Self {
        ChargePolicy {
            delivery_paise,
            handling_paise,
        }
    }

    /// No delivery or handling charges.
    #[inline]
    pub const fn free() -> Self {
        ChargePolicy::new(0, 0)
    }

    /// Returns the delivery charge as Money.
    #[inline]
    pub fn delivery(&self) -> Money {
        Money::from_paise(self.delivery_paise)
    }

    /// Returns the handling charge as Money.
    #[inline]
    pub fn handling(&self) -> Money {
        Money::from_paise(self.handling_paise)
    }
}

impl Default for ChargePolicy {
    fn default() -> Self {
        ChargePolicy::free()
    }
}

// =============================================================================
// Delivery Details
// =============================================================================

/// Buyer-entered delivery information collected on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeliveryDetails {
    /// Full name of the recipient.
    pub name: String,

    /// Mobile number.
    pub phone: String,

    /// Complete delivery address.
    pub address: String,
}

impl DeliveryDetails {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        DeliveryDetails {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

/// The storefront's fixed category set, in display order.
///
/// "All" is a UI filter value, not a category, so it is not listed here.
pub const CATEGORIES: &[&str] = &[
    "Vegetables",
    "Fruits",
    "Poultry & Meat",
    "Dairy & Beverages",
    "Bakery & Snacks",
    "Homemade Essentials",
];

// =============================================================================
// Unit Tests
// =============================================================================
