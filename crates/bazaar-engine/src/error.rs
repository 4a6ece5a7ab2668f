//! # Engine Error Type
//!
//! Unified error type for the engine's operation surface.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bazaar                                 │
//! │                                                                         │
//! │  Validation Error ──► EngineError::Validation ──► UI shows field hint  │
//! │                                                                         │
//! │  Cart limit hit ────► EngineError::Cart ────────► UI shows limit       │
//! │                                                                         │
//! │  Gateway failure ───► EngineError::Gateway ─────► UI keeps the cart,   │
//! │                                                   offers retry         │
//! │                                                                         │
//! │  Snapshot write failure ──► NOT an error. Logged with warn!; the       │
//! │                             in-memory cart stays authoritative.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use bazaar_core::{CoreError, ValidationError};

// =============================================================================
// Gateway Error
// =============================================================================

/// Failures from the external order API.
///
/// The API is an opaque collaborator: the engine only distinguishes "the
/// order was rejected" from "the service could not be reached", which is
/// all the UI needs to phrase a message.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The order API refused the request.
    #[error("order rejected: {reason}")]
    Rejected { reason: String },

    /// The order API could not be reached.
    #[error("order service unavailable: {message}")]
    Unavailable { message: String },
}

// =============================================================================
// Engine Error
// =============================================================================

/// Errors surfaced by the engine's operation surface.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Checkout was attempted with nothing in the cart.
    ///
    /// ## When This Occurs
    /// Only from the checkout flow. Within the engine itself an empty cart
    /// is a valid state, never an error.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart rule was violated (line cap, quantity cap).
    #[error(transparent)]
    Cart(#[from] CoreError),

    /// Caller-supplied input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The external order API failed; the cart is left untouched.
    #[error("Order gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================
