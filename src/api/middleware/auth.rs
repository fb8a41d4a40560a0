//! Credential verification middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Custom header carrying the signed credential.
pub const TOKEN_HEADER: &str = "token";

/// Verifies the caller's credential and attaches the decoded
/// [`Claims`](crate::application::services::Claims) to the request extensions.
///
/// # Header Format
///
/// ```text
/// token: <jwt>
/// ```
///
/// `Authorization: Bearer <jwt>` is accepted when the `token` header is absent.
///
/// # Errors
///
/// Returns `401 Unauthorized` ("forbidden access") if the credential is
/// missing, malformed, signed with another secret or expired.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/profile", get(profile_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = extract_token(&mut parts).await?;
    let claims = st.auth_service.verify(&token)?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

async fn extract_token(parts: &mut Parts) -> Result<String, AppError> {
    if let Some(value) = parts.headers.get(TOKEN_HEADER) {
        return value
            .to_str()
            .map(|s| s.trim().to_string())
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::unauthorized(
                    "forbidden access",
                    json!({ "reason": "token header is empty or not valid ASCII" }),
                )
            });
    }

    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "forbidden access",
                json!({ "reason": "Credential is missing" }),
            )
        })?;

    Ok(token)
}
