//! # Storefront Configuration
//!
//! Configuration loaded at session start.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BAZAAR_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use bazaar_core::{ChargePolicy, DEFAULT_SESSION_KEY};
use bazaar_store::DbConfig;

/// Storefront configuration.
///
/// ## Fields
/// Most fields have sensible defaults for development. The charges default
/// to zero, matching a neighbourhood marketplace that bakes delivery into
/// prices; a deployment that charges for delivery sets them explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Session key under which the cart snapshot is stored.
    pub session_key: String,

    /// Store name (displayed in the header and on order summaries).
    pub store_name: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    pub currency_decimals: u8,

    /// Flat delivery charge in paise.
    pub delivery_charge_paise: i64,

    /// Flat handling charge in paise.
    pub handling_charge_paise: i64,

    /// Seller UPI id shown on the checkout payment card.
    pub seller_upi: String,

    /// Path of the local snapshot database.
    pub database_path: PathBuf,
}

impl Default for StorefrontConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Bazaar Dev Store"
    /// - Currency: INR (₹)
    /// - Charges: zero delivery, zero handling
    /// - Database: under the per-user data dir
    fn default() -> Self {
        StorefrontConfig {
            session_key: DEFAULT_SESSION_KEY.to_string(),
            store_name: "Bazaar Dev Store".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            delivery_charge_paise: 0,
            handling_charge_paise: 0,
            seller_upi: "9876543210@upi".to_string(),
            database_path: default_database_path(),
        }
    }
}

impl StorefrontConfig {
    /// Creates a new StorefrontConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BAZAAR_SESSION_KEY`: Override session key
    /// - `BAZAAR_STORE_NAME`: Override store name
    /// - `BAZAAR_DELIVERY_CHARGE_PAISE`: Override delivery charge
    /// - `BAZAAR_HANDLING_CHARGE_PAISE`: Override handling charge
    /// - `BAZAAR_SELLER_UPI`: Override seller UPI id
    /// - `BAZAAR_DB_PATH`: Override snapshot database path
    pub fn from_env() -> Self {
        let mut config = StorefrontConfig::default();

        if let Ok(session_key) = std::env::var("BAZAAR_SESSION_KEY") {
            config.session_key = session_key;
        }

        if let Ok(store_name) = std::env::var("BAZAAR_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(paise) = std::env::var("BAZAAR_DELIVERY_CHARGE_PAISE") {
            if let Ok(paise) = paise.parse::<i64>() {
                config.delivery_charge_paise = paise;
            }
        }

        if let Ok(paise) = std::env::var("BAZAAR_HANDLING_CHARGE_PAISE") {
            if let Ok(paise) = paise.parse::<i64>() {
                config.handling_charge_paise = paise;
            }
        }

        if let Ok(upi) = std::env::var("BAZAAR_SELLER_UPI") {
            config.seller_upi = upi;
        }

        if let Ok(path) = std::env::var("BAZAAR_DB_PATH") {
            config.database_path = PathBuf::from(path);
        }

        config
    }

    /// Switches to a freshly generated session key (UUID v4).
    ///
    /// For shells that run several anonymous sessions against one local
    /// database and must not have their carts collide.
    pub fn with_fresh_session(mut self) -> Self {
        self.session_key = uuid::Uuid::new_v4().to_string();
        self
    }

    /// Derives the core charge policy from the configured charges.
    pub fn charge_policy(&self) -> ChargePolicy {
        ChargePolicy::new(self.delivery_charge_paise, self.handling_charge_paise)
    }

    /// Derives the snapshot database configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
    }

    /// Formats a paise amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(1234), "₹12.34");
    /// ```
    pub fn format_currency(&self, paise: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = paise / divisor;
        let frac = (paise % divisor).abs();

        format!(
            "{}{}{}",
            if paise < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Default location for the snapshot database.
///
/// - macOS: `~/Library/Application Support/com.bazaar.storefront/bazaar.db`
/// - Windows: `%APPDATA%/bazaar/storefront/bazaar.db`
/// - Linux: `~/.local/share/bazaar-storefront/bazaar.db`
///
/// Falls back to the working directory when no home dir is available
/// (containers, CI).
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "bazaar", "storefront")
        .map(|dirs| dirs.data_dir().join("bazaar.db"))
        .unwrap_or_else(|| PathBuf::from("bazaar.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.currency_code, "INR");
        assert_eq!(config.delivery_charge_paise, 0);
        assert_eq!(config.handling_charge_paise, 0);
        assert_eq!(config.charge_policy(), ChargePolicy::free());
    }

    #[test]
    fn test_format_currency_positive() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(1234), "₹12.34");
        assert_eq!(config.format_currency(100), "₹1.00");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(-1234), "-₹12.34");
    }

    #[test]
    fn test_format_currency_no_decimals() {
        let mut config = StorefrontConfig::default();
        config.currency_decimals = 0;
        assert_eq!(config.format_currency(157), "₹157");
    }

    #[test]
    fn test_fresh_session_keys_are_distinct() {
        let a = StorefrontConfig::default().with_fresh_session();
        let b = StorefrontConfig::default().with_fresh_session();
        assert_ne!(a.session_key, b.session_key);
        assert_ne!(a.session_key, DEFAULT_SESSION_KEY);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("BAZAAR_DELIVERY_CHARGE_PAISE", "2500");
        std::env::set_var("BAZAAR_HANDLING_CHARGE_PAISE", "200");
        std::env::set_var("BAZAAR_SELLER_UPI", "shop@upi");

        let config = StorefrontConfig::from_env();
        assert_eq!(config.delivery_charge_paise, 2500);
        assert_eq!(config.handling_charge_paise, 200);
        assert_eq!(config.seller_upi, "shop@upi");

        std::env::remove_var("BAZAAR_DELIVERY_CHARGE_PAISE");
        std::env::remove_var("BAZAAR_HANDLING_CHARGE_PAISE");
        std::env::remove_var("BAZAAR_SELLER_UPI");
    }
}
