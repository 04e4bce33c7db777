//! Global application error types.
//!
//! [`AppError`] covers failures outside a single request: loading
//! configuration, building the credential service, binding and running the
//! server. Request-level failures are [`crate::auth::errors::AuthError`].

use thiserror::Error;

use crate::auth::errors::AuthError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to initialise credential service: {0}")]
    Auth(#[from] AuthError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
