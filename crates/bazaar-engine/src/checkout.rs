//! # Checkout Flow
//!
//! The Checkout Consumer contract: build an order request from the exact
//! cart snapshot the buyer saw, hand it to the external order API, and
//! clear the cart only once the order is confirmed.
//!
//! ## Checkout Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Sequence                                    │
//! │                                                                         │
//! │  place_order(engine, delivery)                                         │
//! │       │                                                                 │
//! │       ├── cart empty? ──────────► Err(EmptyCart), nothing touched      │
//! │       │                                                                 │
//! │       ├── delivery invalid? ────► Err(Validation), nothing touched     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRequest::from_snapshot ← totals copied verbatim from snapshot    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gateway.submit(request)                                               │
//! │       │                                                                 │
//! │       ├── Err ──────────────────► Err(Gateway), cart and stored        │
//! │       │                           snapshot both intact                 │
//! │       ▼                                                                 │
//! │  engine.clear() ← ONLY after confirmed success                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PlacedOrder { order id for the orders screen }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_core::validation::validate_delivery_details;
use bazaar_core::{CartSnapshot, DeliveryDetails, LineItem};

use crate::config::StorefrontConfig;
use crate::engine::CartEngine;
use crate::error::{EngineError, EngineResult, GatewayError};

// =============================================================================
// Order Request
// =============================================================================

/// The order payload submitted to the external order API.
///
/// ## Exact Total Forwarding
/// Every monetary field is copied verbatim from the cart snapshot. The
/// totals the buyer approved on screen and the totals in this request are
/// the same integers; no recomputation happens on the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Client-generated order reference (UUID v4), usable for idempotent
    /// retries against the order API.
    pub order_ref: String,

    /// The cart lines, prices frozen as they were in the cart.
    pub lines: Vec<LineItem>,

    pub items_total_paise: i64,
    pub delivery_charge_paise: i64,
    pub handling_charge_paise: i64,
    pub grand_total_paise: i64,

    /// Buyer delivery details from the checkout form.
    pub delivery: DeliveryDetails,

    /// Seller UPI id the buyer pays to.
    pub payee_upi: String,

    /// When the buyer confirmed the order.
    pub placed_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Builds an order request from a cart snapshot.
    pub fn from_snapshot(
        snapshot: CartSnapshot,
        delivery: DeliveryDetails,
        payee_upi: impl Into<String>,
    ) -> Self {
        OrderRequest {
            order_ref: Uuid::new_v4().to_string(),
            items_total_paise: snapshot.totals.items_total_paise,
            delivery_charge_paise: snapshot.totals.delivery_charge_paise,
            handling_charge_paise: snapshot.totals.handling_charge_paise,
            grand_total_paise: snapshot.totals.grand_total_paise,
            lines: snapshot.lines,
            delivery,
            payee_upi: payee_upi.into(),
            placed_at: Utc::now(),
        }
    }
}

/// The order API's acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    /// Server-assigned order id (drives the orders screen route).
    pub order_id: String,
}

/// Result handed back to the checkout page.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// Server-assigned order id.
    pub order_id: String,

    /// The request that was accepted, for the confirmation summary.
    pub request: OrderRequest,
}

// =============================================================================
// Order Gateway
// =============================================================================

/// The external order API, consumed as an opaque contract.
///
/// Implementations wrap whatever transport the deployment uses (the
/// storefront's REST backend in production, a recording fake in tests).
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits an order request.
    ///
    /// Returning `Ok` means the order is durably accepted upstream; the
    /// checkout flow treats it as the signal to clear the cart.
    async fn submit(&self, request: &OrderRequest) -> Result<OrderConfirmation, GatewayError>;
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Drives a checkout against one order gateway.
pub struct CheckoutFlow<G> {
    gateway: G,
    payee_upi: String,
}

impl<G: OrderGateway> CheckoutFlow<G> {
    /// Creates a checkout flow for the configured seller.
    pub fn new(gateway: G, config: &StorefrontConfig) -> Self {
        CheckoutFlow {
            gateway,
            payee_upi: config.seller_upi.clone(),
        }
    }

    /// Places an order for the engine's current cart.
    ///
    /// ## Behavior
    /// - Empty cart: `Err(EmptyCart)` (the original storefront's
    ///   alert-and-return; callers preferring a silent no-op can check
    ///   `engine.is_empty()` first)
    /// - Invalid delivery details: `Err(Validation)`
    /// - Gateway failure: `Err(Gateway)`; the cart and its stored snapshot
    ///   are left fully intact for a retry
    /// - Success: the cart is cleared, the stored snapshot erased, and the
    ///   confirmed order returned
    pub async fn place_order(
        &self,
        engine: &mut CartEngine,
        delivery: DeliveryDetails,
    ) -> EngineResult<PlacedOrder> {
        if engine.is_empty() {
            return Err(EngineError::EmptyCart);
        }

        validate_delivery_details(&delivery)?;

        let request =
            OrderRequest::from_snapshot(engine.snapshot(), delivery, self.payee_upi.as_str());

        tracing::debug!(
            order_ref = %request.order_ref,
            grand_total_paise = request.grand_total_paise,
            lines = request.lines.len(),
            "Submitting order"
        );

        let confirmation = self.gateway.submit(&request).await?;

        // The gateway confirmed; only now may the cart be dropped.
        engine.clear().await;

        tracing::info!(
            order_id = %confirmation.order_id,
            order_ref = %request.order_ref,
            "Order placed, cart cleared"
        );

        Ok(PlacedOrder {
            order_id: confirmation.order_id,
            request,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
