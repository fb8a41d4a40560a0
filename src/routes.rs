//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - public routes          - no credential
//! - authenticated routes   - `token` header (or Bearer) required
//! - creator / admin routes - credential plus stored role
//!
//! See [`crate::api::routes`] for the endpoint tables.
//!
//! # Middleware
//!
//! - **CORS** - Browser client access
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Credential verification, then role guard
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{auth, cors, guard, tracing};
use crate::api::routes::{admin_routes, authenticated_routes, creator_routes, public_routes};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware,
/// tolerating trailing slashes.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origin` - allowed browser origin, `*` for any
pub fn app_router(state: AppState, cors_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_origin))
}

/// The routes and middleware of [`app_router`] without path normalization.
pub fn router(state: AppState, cors_origin: &str) -> Router {
    // Route layers run outermost-last: the credential check wraps the role guard.
    let authenticated = authenticated_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let creator = creator_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_creator,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let admin = admin_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::require_admin,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .merge(public_routes())
        .merge(authenticated)
        .merge(creator)
        .merge(admin)
        .with_state(state)
        .layer(cors::layer(cors_origin))
        .layer(tracing::layer())
}
