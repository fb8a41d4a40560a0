//! DTOs for payment intent creation.

use serde::{Deserialize, Serialize};

/// Request body for `POST /create-payment-intent`. `price` is in dollars.
#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}
