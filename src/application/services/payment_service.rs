//! Payment intent creation.

use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::infrastructure::payments::PaymentGateway;

/// Currency for every intent created by the platform.
pub const CURRENCY: &str = "usd";

/// Converts a price in major units to minor units by truncation
/// (`10.999` becomes `1099`).
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0) as i64
}

/// Service delegating intent creation to the configured [`PaymentGateway`].
///
/// Nothing is persisted at this step; the participation record is written
/// only once the client confirms the payment.
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Creates a card-only USD intent for `price` and returns its client secret.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the price is not a positive number or
    /// rounds down to zero cents.
    /// Returns [`AppError::Unavailable`] or [`AppError::BadGateway`] from the gateway.
    pub async fn create_intent(&self, price: f64) -> Result<String, AppError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(AppError::bad_request(
                "Price must be a positive number",
                json!({ "field": "price" }),
            ));
        }

        let amount = to_minor_units(price);
        if amount == 0 {
            return Err(AppError::bad_request(
                "Price is below the smallest chargeable amount",
                json!({ "field": "price", "minorUnits": amount }),
            ));
        }

        let secret = self.gateway.create_intent(amount, CURRENCY).await?;
        tracing::info!(amount, currency = CURRENCY, "Payment intent created");
        Ok(secret)
    }

    pub fn gateway_enabled(&self) -> bool {
        self.gateway.is_enabled()
    }
}
