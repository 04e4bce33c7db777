//! HTTP routes for user data. All of them require a bearer token.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use super::handlers::dashboard;
use crate::auth::middleware::require_auth;
use crate::AppState;

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(from_fn_with_state(state, require_auth))
}
