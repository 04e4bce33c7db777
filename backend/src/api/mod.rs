//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for API domains other than the
//! core authentication routes, which live in `auth`.

pub mod user;
