//! Handlers for payment intents and completed payments.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::participation::RecordPaymentRequest;
use crate::api::dto::payment::{PaymentIntentRequest, PaymentIntentResponse};
use crate::api::dto::results::InsertResult;
use crate::application::services::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a card-only USD payment intent for `price` dollars.
///
/// # Endpoint
///
/// `POST /create-payment-intent` (credential)
///
/// # Errors
///
/// Returns 400 for a non-positive price, 503 if payments are not configured,
/// 502 if the gateway refuses.
pub async fn payment_intent_handler(
    State(state): State<AppState>,
    Json(payload): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let client_secret = state.payment_service.create_intent(payload.price).await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// Records a confirmed payment for the caller and counts them in.
///
/// # Endpoint
///
/// `POST /payments` (credential)
///
/// # Errors
///
/// Returns 400 for negative amounts, 404 if the contest does not exist.
pub async fn record_payment_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<Json<InsertResult>, AppError> {
    payload.validate()?;

    let record = state
        .participation_service
        .record_payment(payload.into_new_participation(claims.email))
        .await?;

    Ok(Json(InsertResult::inserted(record.id)))
}
