//! Stripe-backed payment gateway.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

use super::gateway::PaymentGateway;
use crate::error::AppError;

/// Creates payment intents through the Stripe REST API.
///
/// Only intent creation happens server-side; the browser confirms the payment
/// with the returned client secret and then reports it via `POST /payments`.
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
    code: Option<String>,
}

impl StripeGateway {
    /// Creates a gateway client.
    ///
    /// # Arguments
    ///
    /// - `api_base` - API root, e.g. `https://api.stripe.com`
    /// - `secret_key` - server-side secret key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<String, AppError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        debug!(amount_minor, currency, "Creating payment intent");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", amount_minor.to_string()),
                ("currency", currency.to_string()),
                ("payment_method_types[]", "card".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Payment gateway unreachable");
                AppError::bad_gateway("Payment gateway unreachable", json!({}))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<StripeErrorBody>()
                .await
                .map(|b| b.error)
                .ok();
            warn!(status = status.as_u16(), "Payment gateway rejected intent");
            return Err(AppError::bad_gateway(
                "Payment gateway rejected the request",
                json!({
                    "status": status.as_u16(),
                    "message": detail.as_ref().and_then(|d| d.message.clone()),
                    "code": detail.and_then(|d| d.code),
                }),
            ));
        }

        let intent = response.json::<IntentResponse>().await.map_err(|e| {
            warn!(error = %e, "Unexpected payment gateway response");
            AppError::bad_gateway("Unexpected payment gateway response", json!({}))
        })?;

        Ok(intent.client_secret)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
