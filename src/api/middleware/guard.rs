//! Role guards. Must run after [`super::auth::layer`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::application::services::Claims;
use crate::domain::entities::Role;
use crate::{error::AppError, state::AppState};

/// Lets the request through only if the caller's stored role is `creator`.
///
/// The verified [`User`](crate::domain::entities::User) is added to the
/// request extensions.
pub async fn require_creator(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require(st, req, next, Role::Creator).await
}

/// Lets the request through only if the caller's stored role is `admin`.
pub async fn require_admin(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require(st, req, next, Role::Admin).await
}

async fn require(
    st: AppState,
    mut req: Request,
    next: Next,
    role: Role,
) -> Result<Response, AppError> {
    let email = req
        .extensions()
        .get::<Claims>()
        .map(|c| c.email.clone())
        .ok_or_else(|| {
            AppError::unauthorized(
                "forbidden access",
                json!({ "reason": "Credential was not verified" }),
            )
        })?;

    // Looked up on every request so role changes apply immediately.
    let user = st.auth_service.require_role(&email, role).await?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
