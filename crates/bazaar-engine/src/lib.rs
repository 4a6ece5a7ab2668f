//! # bazaar-engine: Cart Engine Orchestration
//!
//! The storefront-facing layer of Bazaar. One [`CartEngine`] per session,
//! constructed by the shell and passed by reference to every page that
//! mutates or reads the cart.
//!
//! ## Module Organization
//! ```text
//! bazaar_engine/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── engine.rs       ◄─── CartEngine: mutations + persistence hook
//! ├── catalog.rs      ◄─── Read-only catalog view and browse queries
//! ├── checkout.rs     ◄─── Order request, gateway seam, checkout flow
//! ├── config.rs       ◄─── Storefront configuration
//! └── error.rs        ◄─── Engine error type
//! ```
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bazaar Data Flow                                     │
//! │                                                                         │
//! │  Catalog API ──► Catalog::refresh ──► catalog.get(id)                  │
//! │                                            │                            │
//! │                              (add-to-cart event)                        │
//! │                                            ▼                            │
//! │  CartEngine ◄── add_or_adjust / set_quantity / remove_line             │
//! │       │                                                                 │
//! │       ├──► snapshot() ──► CheckoutFlow::place_order ──► OrderGateway   │
//! │       │                            │                                    │
//! │       │                    (confirmed success)                          │
//! │       │                            ▼                                    │
//! │       └──────────────────── engine.clear()                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use bazaar_engine::{CartEngine, StorefrontConfig};
//! use bazaar_store::Database;
//!
//! # async fn run() {
//! let config = StorefrontConfig::from_env();
//! let db = Database::new(config.db_config()).await.unwrap();
//!
//! let mut engine = CartEngine::restore(&db, &config).await;
//! let snapshot = engine.snapshot();
//! println!("{} lines in cart", snapshot.totals.line_count);
//! # }
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod engine;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{BrowseQuery, Catalog, SortOption};
pub use checkout::{CheckoutFlow, OrderConfirmation, OrderGateway, OrderRequest, PlacedOrder};
pub use config::StorefrontConfig;
pub use engine::CartEngine;
pub use error::{EngineError, EngineResult, GatewayError};
