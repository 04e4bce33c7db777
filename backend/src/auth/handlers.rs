//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request bodies, call into `auth::service` for the
//! actual work, and shape the JSON responses. Failures are returned as
//! [`AuthError`], which renders itself.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::errors::AuthError;
use super::models::{AuthorizedAccount, Credentials, DeletedResponse, LoginResponse, MessageResponse};
use crate::AppState;

fn parse_body(body: Result<Json<Credentials>, JsonRejection>) -> Result<(String, String), AuthError> {
    let Json(credentials) = body.map_err(|rejection| AuthError::MalformedBody(rejection.body_text()))?;
    Ok((
        credentials.username.unwrap_or_default(),
        credentials.password.unwrap_or_default(),
    ))
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    let (username, password) = parse_body(body)?;
    let account = state.credentials.register(&username, &password).await?;
    tracing::info!(account_id = %account.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created successfully.",
        }),
    ))
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let (username, password) = parse_body(body)?;
    let token = state.credentials.authenticate(&username, &password).await?;
    tracing::debug!("login succeeded");

    Ok(Json(LoginResponse {
        success: true,
        token: token.into_string(),
    }))
}

/// `DELETE /account`, behind [`super::middleware::require_auth`].
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(AuthorizedAccount(account)): Extension<AuthorizedAccount>,
) -> Result<Json<DeletedResponse>, AuthError> {
    state.credentials.delete_account(account.id).await?;
    tracing::info!(account_id = %account.id, "account deleted");

    Ok(Json(DeletedResponse {
        success: true,
        message: "Account deleted successfully",
    }))
}
