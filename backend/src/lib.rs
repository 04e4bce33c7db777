//! Account service: registration, login with signed tokens, account deletion
//! and a dashboard view, served over HTTP with axum.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::auth::CredentialService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
}

impl AppState {
    pub fn new(credentials: CredentialService) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

/// Build the full router with every route and layer attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::auth_router(state.clone()))
        .merge(api::user::user_router(state.clone()))
        .layer(middleware::cors_layer())
        .layer(middleware::trace_layer())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to the account service!"
}
