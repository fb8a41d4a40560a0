//! Handler for credential issuance.

use axum::{Json, extract::State};
use serde_json::{Map, Value};

use crate::api::dto::auth::TokenResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Signs the posted claims into a 24h credential.
///
/// # Endpoint
///
/// `POST /jwt`
///
/// No identity check happens here; the client is expected to have completed
/// an external login first.
///
/// # Errors
///
/// Returns 400 if the claims carry no `email`.
pub async fn issue_token_handler(
    State(state): State<AppState>,
    Json(claims): Json<Map<String, Value>>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.auth_service.issue(claims)?;
    Ok(Json(TokenResponse { token }))
}
