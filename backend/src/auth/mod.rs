//! Authentication module for managing user accounts and access control.
//!
//! This module provides the public interface for registration, login, token
//! issuance and verification, account deletion, and the authorization
//! middleware guarding protected routes.

pub mod routes;
pub mod handlers;
pub mod models;
pub mod middleware;
pub mod service;
pub mod errors;
pub mod jwt;
pub mod password;

// Re-exports for convenience
pub use handlers::*;
pub use models::*;
pub use middleware::*;
pub use routes::*;
pub use service::*;
pub use errors::*;
