//! # Cart Engine
//!
//! Owns the cart for one storefront session and keeps the durable copy in
//! step with it.
//!
//! ## Engine Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Lifecycle                                │
//! │                                                                         │
//! │  Session start                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartEngine::restore ── load snapshot ── parse ──► live cart           │
//! │       │                     │              │                            │
//! │       │                  missing        corrupt                         │
//! │       │                     └──────┬───────┘                            │
//! │       │                            ▼                                    │
//! │       │                      empty cart (warn on corrupt, never fail)  │
//! │       ▼                                                                 │
//! │  add_or_adjust / set_quantity / remove_line                            │
//! │       │  validate ──► mutate in memory ──► persist (best effort)       │
//! │       ▼                                                                 │
//! │  snapshot() ──► checkout flow ──► order confirmed ──► clear()          │
//! │                                                        │                │
//! │                                   empty cart + stored row erased ◄─────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! There is no ambient singleton. The storefront shell constructs one
//! engine per session and passes it (by reference) to the shop grid, the
//! cart sidebar and the checkout page; all three mutate through the same
//! two call shapes.
//!
//! ## Persistence Contract
//! The snapshot is written by the engine's own mutation methods and by
//! nothing else, so re-renders can never trigger redundant writes. Writes
//! are best-effort: a failure is logged and the in-memory cart remains
//! authoritative for the session.

use tracing::{debug, info, warn};

use bazaar_core::validation::{
    validate_cart_size, validate_line_quantity, validate_price_paise, validate_product_id,
    validate_product_name,
};
use bazaar_core::{Cart, CartSnapshot, CatalogProduct, ChargePolicy, CoreError, LineItem};
use bazaar_core::{MAX_CART_LINES, MAX_LINE_QUANTITY};
use bazaar_store::{CartSnapshotRepository, Database};

use crate::config::StorefrontConfig;
use crate::error::EngineResult;

/// The cart engine for one storefront session.
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    session_key: String,
    charges: ChargePolicy,
    snapshots: CartSnapshotRepository,
}

impl CartEngine {
    /// Restores the engine for the configured session.
    ///
    /// Reads the persisted snapshot once. A missing row starts an empty
    /// cart; an unreadable or unparseable payload is logged and ALSO starts
    /// an empty cart. Rehydration is never a fatal error.
    pub async fn restore(db: &Database, config: &StorefrontConfig) -> Self {
        let snapshots = db.snapshots();
        let session_key = config.session_key.clone();

        let cart = match snapshots.load(&session_key).await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<LineItem>>(&payload) {
                Ok(lines) => {
                    let cart = Cart::from_lines(lines);
                    info!(
                        session_key = %session_key,
                        lines = cart.line_count(),
                        "Cart rehydrated from snapshot"
                    );
                    cart
                }
                Err(e) => {
                    warn!(
                        session_key = %session_key,
                        error = %e,
                        "Stored cart snapshot is unparseable, starting empty"
                    );
                    Cart::new()
                }
            },
            Ok(None) => {
                debug!(session_key = %session_key, "No stored snapshot, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(
                    session_key = %session_key,
                    error = %e,
                    "Failed to read cart snapshot, starting empty"
                );
                Cart::new()
            }
        };

        CartEngine {
            cart,
            session_key,
            charges: config.charge_policy(),
            snapshots,
        }
    }

    /// Applies a relative quantity change and persists the result.
    ///
    /// ## Behavior
    /// - Existing line: quantity becomes `q + delta`; removed at <= 0
    /// - New product with positive delta: appended
    /// - Missing line with non-positive delta, or zero delta: no-op
    ///
    /// ## Errors
    /// - Product record fails validation (blank id/name, negative price)
    /// - Resulting quantity would exceed the per-line cap
    /// - A new line would exceed the line-count cap
    pub async fn add_or_adjust(
        &mut self,
        product: &CatalogProduct,
        delta: i64,
    ) -> EngineResult<CartSnapshot> {
        debug!(product_id = %product.product_id, delta = %delta, "add_or_adjust");

        validate_product_id(&product.product_id)?;
        validate_product_name(&product.name)?;
        validate_price_paise(product.unit_price_paise)?;

        let existing_qty = self
            .cart
            .line(&product.product_id)
            .map(|l| l.quantity)
            .unwrap_or(0);
        let resulting_qty = existing_qty + delta;

        if validate_line_quantity(resulting_qty).is_err() {
            return Err(CoreError::QuantityTooLarge {
                requested: resulting_qty,
                max: MAX_LINE_QUANTITY,
            }
            .into());
        }

        // Only a first-time add grows the line count.
        if existing_qty == 0 && delta > 0 && validate_cart_size(self.cart.line_count()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            }
            .into());
        }

        self.cart.add_or_adjust(product, delta);
        self.persist().await;

        Ok(self.snapshot())
    }

    /// Sets a line's quantity to an absolute value and persists the result.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line if present (absence is a no-op)
    /// - `quantity > 0`: sets an existing line exactly; idempotent
    ///
    /// ## Precondition
    /// A positive quantity for an untracked id is a no-op; creation routes
    /// through [`CartEngine::add_or_adjust`], which carries product data.
    pub async fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> EngineResult<CartSnapshot> {
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity");

        if validate_line_quantity(quantity).is_err() {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            }
            .into());
        }

        self.cart.set_quantity(product_id, quantity);
        self.persist().await;

        Ok(self.snapshot())
    }

    /// Removes a line from the cart and persists the result.
    ///
    /// Equivalent to `set_quantity(product_id, 0)`; cannot fail.
    pub async fn remove_line(&mut self, product_id: &str) -> CartSnapshot {
        debug!(product_id = %product_id, "remove_line");

        self.cart.remove_line(product_id);
        self.persist().await;

        self.snapshot()
    }

    /// Empties the cart and erases the stored snapshot.
    ///
    /// ## When Used
    /// Called by the checkout flow after the order gateway confirms
    /// success, and never before: a failed order must not lose the cart.
    pub async fn clear(&mut self) -> CartSnapshot {
        info!(session_key = %self.session_key, "Clearing cart");

        self.cart.clear();

        if let Err(e) = self.snapshots.delete(&self.session_key).await {
            warn!(
                session_key = %self.session_key,
                error = %e,
                "Failed to erase cart snapshot"
            );
        }

        self.snapshot()
    }

    /// Returns the current snapshot: ordered lines plus computed totals.
    ///
    /// Read-only; does not mutate and does not persist.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot(&self.charges)
    }

    /// Checks if the cart is empty.
    ///
    /// Whether an empty cart blocks checkout navigation is the caller's
    /// policy; the engine only answers the question.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The session key this engine persists under.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// Writes the current line collection to the snapshot store.
    ///
    /// Best-effort: a failure is logged and swallowed. The in-memory cart
    /// remains authoritative for the session either way.
    async fn persist(&self) {
        let payload = match serde_json::to_string(self.cart.lines()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart snapshot");
                return;
            }
        };

        if let Err(e) = self.snapshots.save(&self.session_key, &payload).await {
            warn!(
                session_key = %self.session_key,
                error = %e,
                "Failed to persist cart snapshot"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_store::DbConfig;

    fn test_config() -> StorefrontConfig {
        let mut config = StorefrontConfig::default();
        config.session_key = "session-test".to_string();
        config.delivery_charge_paise = 2500;
        config.handling_charge_paise = 200;
        config
    }

    async fn test_engine(db: &Database) -> CartEngine {
        CartEngine::restore(db, &test_config()).await
    }

    fn product(id: &str, price_paise: i64) -> CatalogProduct {
        CatalogProduct::new(id, format!("Product {}", id), price_paise)
    }

    #[tokio::test]
    async fn test_restore_without_snapshot_starts_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let engine = test_engine(&db).await;

        assert!(engine.is_empty());
        assert_eq!(engine.snapshot().totals.items_total_paise, 0);
    }

    #[tokio::test]
    async fn test_mutations_persist_and_restore() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut engine = test_engine(&db).await;
            engine.add_or_adjust(&product("A", 5000), 2).await.unwrap();
            engine.add_or_adjust(&product("B", 3000), 1).await.unwrap();
            engine.set_quantity("B", 4).await.unwrap();
        }

        // A fresh engine over the same database sees the same cart.
        let engine = test_engine(&db).await;
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.totals.line_count, 2);
        assert_eq!(snapshot.lines[0].product_id, "A");
        assert_eq!(snapshot.lines[0].quantity, 2);
        assert_eq!(snapshot.lines[1].quantity, 4);
        assert_eq!(snapshot.totals.items_total_paise, 22_000);
        assert_eq!(snapshot.totals.grand_total_paise, 24_700);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_restores_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.snapshots()
            .save("session-test", "{not json")
            .await
            .unwrap();

        let engine = test_engine(&db).await;
        assert!(engine.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_totals_match_spec_walkthrough() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        let rice = CatalogProduct::new("A", "Rice", 5000);
        let snapshot = engine.add_or_adjust(&rice, 2).await.unwrap();
        assert_eq!(snapshot.totals.items_total_paise, 10_000);

        let snapshot = engine.add_or_adjust(&rice, 1).await.unwrap();
        assert_eq!(snapshot.lines[0].quantity, 3);
        assert_eq!(snapshot.totals.items_total_paise, 15_000);

        let snapshot = engine.add_or_adjust(&rice, -3).await.unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.totals.items_total_paise, 0);
    }

    #[tokio::test]
    async fn test_quantity_cap_rejected_before_mutation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        engine.add_or_adjust(&product("A", 5000), 998).await.unwrap();
        let err = engine.add_or_adjust(&product("A", 5000), 5).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::EngineError::Cart(CoreError::QuantityTooLarge { .. })
        ));

        // The failed call must not have changed the cart.
        assert_eq!(engine.snapshot().lines[0].quantity, 998);
    }

    #[tokio::test]
    async fn test_set_quantity_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        engine.add_or_adjust(&product("A", 5000), 2).await.unwrap();
        let first = engine.set_quantity("A", 7).await.unwrap();
        let second = engine.set_quantity("A", 7).await.unwrap();

        assert_eq!(first.totals, second.totals);
        assert_eq!(first.lines[0].quantity, 7);
    }

    #[tokio::test]
    async fn test_clear_erases_stored_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        engine.add_or_adjust(&product("A", 5000), 2).await.unwrap();
        assert!(db.snapshots().load("session-test").await.unwrap().is_some());

        let snapshot = engine.clear().await;

        assert!(snapshot.is_empty());
        assert!(db.snapshots().load("session-test").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_line_persists() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        engine.add_or_adjust(&product("A", 5000), 2).await.unwrap();
        engine.add_or_adjust(&product("B", 3000), 1).await.unwrap();
        engine.remove_line("A").await;

        let restored = test_engine(&db).await;
        assert_eq!(restored.snapshot().totals.line_count, 1);
        assert_eq!(restored.snapshot().lines[0].product_id, "B");
    }

    #[tokio::test]
    async fn test_closed_store_does_not_fail_mutations() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut engine = test_engine(&db).await;

        // Kill the store out from under the engine; mutations keep working
        // against the in-memory cart.
        db.close().await;

        let snapshot = engine.add_or_adjust(&product("A", 5000), 2).await.unwrap();
        assert_eq!(snapshot.totals.items_total_paise, 10_000);
        assert!(!engine.is_empty());
    }
}
