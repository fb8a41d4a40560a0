//! Payment gateway trait and the disabled fallback.

use async_trait::async_trait;
use serde_json::json;

use crate::error::AppError;

/// External capability that creates payment intents.
///
/// # Implementations
///
/// - [`crate::infrastructure::payments::StripeGateway`] - Stripe REST API
/// - [`DisabledGateway`] - used when no gateway secret is configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a card-only payment intent and returns its client secret.
    ///
    /// `amount_minor` is in the currency's minor unit (cents for USD).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadGateway`] when the gateway rejects the request or
    /// cannot be reached, [`AppError::Unavailable`] when payments are disabled.
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, AppError>;

    /// Whether this gateway can take payments.
    fn is_enabled(&self) -> bool;
}

/// Gateway used when payments are not configured. Every intent is refused.
pub struct DisabledGateway;

impl DisabledGateway {
    pub fn new() -> Self {
        tracing::debug!("Using DisabledGateway (payments disabled)");
        Self
    }
}

impl Default for DisabledGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_intent(&self, _amount_minor: i64, _currency: &str) -> Result<String, AppError> {
        Err(AppError::unavailable(
            "Payments are not configured",
            json!({ "hint": "Set STRIPE_SECRET_KEY to enable payments" }),
        ))
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
