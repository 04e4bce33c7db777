//! Middleware for protecting authenticated routes.
//!
//! [`require_auth`] reads the `Authorization: Bearer <token>` header, resolves
//! the token to an account through the credential service, and stores the
//! result as an [`AuthorizedAccount`] request extension.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use super::errors::AuthError;
use super::models::AuthorizedAccount;
use crate::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers())
        .ok_or(AuthError::MissingToken)?
        .to_owned();
    let account = state.credentials.authorize(&token).await?;
    request.extensions_mut().insert(AuthorizedAccount(account));
    Ok(next.run(request).await)
}

/// The token part of a `Bearer` authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
