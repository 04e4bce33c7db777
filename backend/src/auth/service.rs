//! Core business logic for the authentication system.
//!
//! [`CredentialService`] sits on top of the account repository. It creates
//! accounts, checks credentials, issues signed tokens and resolves tokens back
//! to accounts. It holds no per-request state and never logs; every failure
//! comes back as an [`AuthError`] for the HTTP layer to render.

use std::sync::Arc;

use uuid::Uuid;

use super::errors::AuthError;
use super::jwt::JwtKeys;
use super::models::{AccountSummary, Claims, SignedToken};
use super::password::PasswordHashing;
use crate::config::AuthConfig;
use crate::database::{AccountRepository, AccountStore};

pub struct CredentialService {
    accounts: AccountRepository,
    hashing: PasswordHashing,
    keys: JwtKeys,
    // Compared against when the username is unknown, so that path costs a
    // full verification as well.
    dummy_hash: String,
}

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, config: &AuthConfig) -> Result<Self, AuthError> {
        let hashing = PasswordHashing::new(config.hash_cost)?;
        let dummy_hash = hashing.hash(&Uuid::new_v4().to_string())?;
        Ok(Self {
            accounts: AccountRepository::new(store, hashing.clone()),
            hashing,
            keys: JwtKeys::new(&config.jwt_secret, config.token_lifetime),
            dummy_hash,
        })
    }

    pub fn accounts(&self) -> &AccountRepository {
        &self.accounts
    }

    /// Create an account. A taken username is [`AuthError::AlreadyExists`].
    pub async fn register(&self, username: &str, password: &str) -> Result<AccountSummary, AuthError> {
        let record = self.accounts.create(username, password).await?;
        Ok(record.into())
    }

    /// Check credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SignedToken, AuthError> {
        let (account_id, stored_hash) = match self.accounts.find_by_username(username).await {
            Ok(record) => (Some(record.id), record.password_hash),
            Err(AuthError::NotFound) => (None, self.dummy_hash.clone()),
            Err(err) => return Err(err),
        };

        let matches = self
            .hashing
            .verify_blocking(password.to_owned(), stored_hash)
            .await?;

        match account_id {
            Some(id) if matches => self.keys.issue(id),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Delete an account. The caller must already have established that `id`
    /// belongs to the requester.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AuthError> {
        self.accounts.delete_by_id(id).await
    }

    /// Signature and expiry check only.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.keys.verify(token)
    }

    /// Resolve a bearer token to the account it was issued for.
    ///
    /// A valid token for an account that no longer exists is
    /// [`AuthError::InvalidToken`].
    pub async fn authorize(&self, token: &str) -> Result<AccountSummary, AuthError> {
        let claims = self.verify_token(token)?;
        match self.accounts.find_by_id(claims.id).await {
            Ok(record) => Ok(record.into()),
            Err(AuthError::NotFound) => Err(AuthError::InvalidToken),
            Err(err) => Err(err),
        }
    }
}
