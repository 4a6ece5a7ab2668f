//! # bazaar-core: Pure Business Logic for the Bazaar Storefront
//!
//! This crate is the **heart** of the storefront. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (TypeScript SPA)               │   │
//! │  │    Shop Grid ──► Cart Sidebar ──► Checkout ──► Order Screen    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-engine                                │   │
//! │  │    CartEngine, Catalog, CheckoutFlow, StorefrontConfig          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Catalog  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Product  │  │  (paise)  │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-store (Persistence Layer)             │   │
//! │  │              SQLite snapshot storage keyed by session           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogProduct, ChargePolicy, DeliveryDetails)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart reconciliation state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Total Mutations**: Cart mutations never fail; out-of-range input is
//!    rejected by validators before a mutation runs
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{Cart, CatalogProduct, ChargePolicy};
//!
//! let rice = CatalogProduct::new("p-rice", "Basmati Rice 1kg", 5000);
//!
//! let mut cart = Cart::new();
//! cart.add_or_adjust(&rice, 2);
//!
//! let totals = cart.totals(&ChargePolicy::free());
//! assert_eq!(totals.items_total_paise, 10_000); // ₹100.00
//! assert_eq!(totals.grand_total_paise, 10_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bazaar_core::Money` instead of
// `use bazaar_core::money::Money`

pub use cart::{Cart, CartSnapshot, CartTotals, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Session key used when the embedding application manages a single
/// anonymous session (the common storefront case before login).
pub const DEFAULT_SESSION_KEY: &str = "session-local";

/// Maximum number of distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps snapshot payloads bounded.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
