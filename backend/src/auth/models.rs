//! Data structures for authentication-related entities.
//!
//! Request and response bodies for the account endpoints, the public account
//! summary, and the claims carried inside a signed token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::AccountRecord;

/// Body of `POST /register` and `POST /login`.
///
/// Fields are optional so a missing one surfaces as a validation failure
/// instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountRecord> for AccountSummary {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier.
    pub id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// An encoded token. Opaque to callers.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(pub(crate) String);

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SignedToken(..)")
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: &'static str,
}

/// The identity established by the authorization middleware, stored in the
/// request extensions for downstream handlers.
#[derive(Debug, Clone)]
pub struct AuthorizedAccount(pub AccountSummary);
