//! Handlers for registration, admin user management and profiles.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::results::{DeleteResult, InsertResult, UpdateResult};
use crate::api::dto::user::{ProfileRequest, RegisterRequest, RoleRequest, RoleResponse, UserItem};
use crate::application::services::Claims;
use crate::domain::entities::{ProfilePatch, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a user unless the email is already known.
///
/// # Endpoint
///
/// `POST /users`
///
/// # Response
///
/// `{"acknowledged": true, "insertedId": 7}` for a new user, or
/// `{"message": "user is already exist", "insertedId": null}` for a known email.
///
/// # Errors
///
/// Returns 400 for an invalid email, an unknown role, or `admin`.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<InsertResult>, AppError> {
    payload.validate()?;

    let role = match payload.role.as_deref() {
        Some(role) => role.parse::<Role>()?,
        None => Role::default(),
    };

    let created = state
        .user_service
        .register(payload.into_new_user(role))
        .await?;

    Ok(Json(match created {
        Some(user) => InsertResult::inserted(user.id),
        None => InsertResult::skipped("user is already exist"),
    }))
}

/// Lists all users.
///
/// # Endpoint
///
/// `GET /users` (admin)
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserItem>>, AppError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserItem::from).collect()))
}

/// Deletes a user.
///
/// # Endpoint
///
/// `DELETE /users/{id}` (admin)
///
/// # Errors
///
/// Returns 404 if the user does not exist.
pub async fn delete_user_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, AppError> {
    state.user_service.delete_user(id).await?;
    Ok(Json(DeleteResult::deleted()))
}

/// Sets a user's role.
///
/// # Endpoint
///
/// `PATCH /users/{id}` (admin) with `{"role": "creator"}`
///
/// # Errors
///
/// Returns 400 for an unknown role, 404 if the user does not exist.
pub async fn update_role_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<RoleRequest>,
) -> Result<Json<UpdateResult>, AppError> {
    let role: Role = payload.role.parse()?;
    state.user_service.set_role(id, role).await?;
    Ok(Json(UpdateResult::modified()))
}

/// Returns the stored role for an email; `{}` when the email is unknown.
///
/// # Endpoint
///
/// `GET /userRole/{email}` (credential)
pub async fn user_role_handler(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RoleResponse>, AppError> {
    let role = state.user_service.role_of(&email).await?;
    Ok(Json(RoleResponse {
        role: role.map(|r| r.as_str().to_string()),
    }))
}

/// Returns the caller's own user record.
///
/// # Endpoint
///
/// `GET /profile` (credential)
///
/// # Errors
///
/// Returns 404 if the credential's email is not registered.
pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserItem>, AppError> {
    let user = state.user_service.profile(&claims.email).await?;
    Ok(Json(user.into()))
}

/// Updates the caller's display name and/or photo.
///
/// # Endpoint
///
/// `PATCH /profile` (credential)
///
/// # Errors
///
/// Returns 400 if nothing would change, 404 if the email is not registered.
pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<UserItem>, AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .update_profile(
            &claims.email,
            ProfilePatch {
                name: payload.name,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok(Json(user.into()))
}
