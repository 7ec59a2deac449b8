//! Storefront configuration.

use std::path::PathBuf;
use std::time::Duration;

use alura_commerce::prelude::*;
use serde::{Deserialize, Serialize};

use crate::notification::NotificationTiming;
use crate::AppError;

/// Delay between a successful order and the return to the home page.
pub const DEFAULT_CHECKOUT_REDIRECT: Duration = Duration::from_millis(100);

/// Settings for a [`Storefront`](crate::Storefront).
///
/// Every field has a default, so an empty `[storefront]` table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Storage key the cart is persisted under.
    pub storage_key: String,

    /// Sales tax in basis points (500 = 5%).
    pub tax_rate_bps: u32,

    /// Flat shipping charge in cents.
    pub flat_shipping_cents: i64,

    /// How long a notification stays visible, in milliseconds.
    pub notification_display_ms: u64,

    /// Notification fade-out duration, in milliseconds.
    pub notification_fade_ms: u64,

    /// Delay before returning home after an order, in milliseconds.
    pub checkout_redirect_ms: u64,

    /// JSON product list to use instead of the built-in collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        let pricing = PricingPolicy::default();
        let timing = NotificationTiming::default();
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            tax_rate_bps: pricing.tax_rate_bps,
            flat_shipping_cents: pricing.flat_shipping.amount_cents,
            notification_display_ms: duration_ms(timing.display),
            notification_fade_ms: duration_ms(timing.fade),
            checkout_redirect_ms: duration_ms(DEFAULT_CHECKOUT_REDIRECT),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Parse a config from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        let config: Self = toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the storefront cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.storage_key.trim().is_empty() {
            return Err(AppError::Config("storage_key must not be empty".into()));
        }
        if self.flat_shipping_cents < 0 {
            return Err(AppError::Config(format!(
                "flat_shipping_cents must not be negative, got {}",
                self.flat_shipping_cents
            )));
        }
        Ok(())
    }

    pub fn pricing(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate_bps: self.tax_rate_bps,
            flat_shipping: Money::new(self.flat_shipping_cents),
        }
    }

    pub fn notification_timing(&self) -> NotificationTiming {
        NotificationTiming {
            display: Duration::from_millis(self.notification_display_ms),
            fade: Duration::from_millis(self.notification_fade_ms),
        }
    }

    pub fn checkout_redirect(&self) -> Duration {
        Duration::from_millis(self.checkout_redirect_ms)
    }

    /// Load the catalog: the file at `catalog_path` if set, the built-in
    /// collection otherwise.
    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::alura_collection());
        };

        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;
        let catalog = Catalog::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "loaded catalog");
        Ok(catalog)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
