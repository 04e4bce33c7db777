//! Custom error types specific to authentication failures.
//!
//! [`AuthError`] is the full set of failures the credential service can
//! return. Each variant maps to one HTTP status and a JSON `{"message": ...}`
//! body; internal detail is logged here at the boundary and withheld from the
//! caller.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::database::StoreError;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("Path `{field}` is required."))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Wrapper so the validation message lists every field in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn names(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("An account with that username already exists.")]
    AlreadyExists,

    // Deliberately the same for unknown usernames and wrong passwords.
    #[error("Invalid login credentials.")]
    InvalidCredentials,

    #[error("Authentication required.")]
    MissingToken,

    #[error("Invalid or expired token.")]
    InvalidToken,

    #[error("Account not found.")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(FieldErrors(errors))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedBody(_) | Self::AlreadyExists => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidCredentials | Self::MissingToken | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "An unexpected condition was encountered.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::Unavailable(detail) => Self::Internal(detail),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(detail) => tracing::error!(%detail, "request failed"),
            other => tracing::debug!(error = %other, status = status.as_u16(), "request rejected"),
        }
        let body = ErrorBody {
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
