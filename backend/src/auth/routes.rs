//! Defines the HTTP routes specifically for authentication.
//!
//! `/register` and `/login` are public. `/account` requires a bearer token.

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, post};
use axum::Router;

use super::handlers::{delete_account, login, register};
use super::middleware::require_auth;
use crate::AppState;

pub fn auth_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/account", delete(delete_account))
        .route_layer(from_fn_with_state(state, require_auth));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}
