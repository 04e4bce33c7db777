//! Module for user profile API endpoints.
//!
//! This module handles functionalities related to user information that is
//! distinct from the core authentication process, such as the dashboard view
//! of the signed-in account.

pub mod handlers;
pub mod routes;

pub use routes::user_router;
