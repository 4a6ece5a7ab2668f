//! # Validation Module
//!
//! Input validation for the cart engine and checkout flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI (TypeScript)                                   │
//! │  ├── Basic format checks (empty fields, length)                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine (Rust)                                                │
//! │  └── THIS MODULE: limit and format checks before a mutation runs       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pure cart mutations (total, never fail)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart's own semantics treat non-positive quantities as removal
//! requests, so validators here reject only what no call site may ever
//! mean: quantities beyond the per-line cap, negative prices, oversized
//! carts, blank required fields.

use crate::error::ValidationError;
use crate::types::DeliveryDetails;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a resulting line quantity.
///
/// ## Rules
/// - Any value <= 0 is fine: the cart treats it as a removal
/// - Positive values must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_line_quantity(qty: i64) -> ValidationResult<()> {
    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before appending a NEW line.
///
/// ## Rules
/// - Must not exceed MAX_CART_LINES (100) distinct lines
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a product id.
///
/// The id is opaque (assigned by the upstream catalog API), so the only
/// rule is that it is present.
pub fn validate_product_id(product_id: &str) -> ValidationResult<()> {
    if product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "productId".to_string(),
        });
    }

    Ok(())
}

/// Validates buyer delivery details collected on the checkout page.
///
/// ## Rules
/// - name, phone and address are all required
/// - address is capped to keep order payloads bounded
pub fn validate_delivery_details(details: &DeliveryDetails) -> ValidationResult<()> {
    for (field, value) in [
        ("name", &details.name),
        ("phone", &details.phone),
        ("address", &details.address),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if details.address.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "address".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
