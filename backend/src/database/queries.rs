//! Account repository: the validated, hashing front of the store.
//!
//! This is where account records are created. Input is validated, the
//! plaintext is hashed exactly once, and the record goes through the store's
//! atomic insert. Store failures convert into [`AuthError`] on the way out, so
//! a taken username surfaces as [`AuthError::AlreadyExists`].

use std::sync::Arc;

use uuid::Uuid;

use super::{AccountRecord, AccountStore, StoreError};
use crate::auth::errors::{AuthError, FieldError};
use crate::auth::password::PasswordHashing;

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone)]
pub struct AccountRepository {
    store: Arc<dyn AccountStore>,
    hashing: PasswordHashing,
}

impl AccountRepository {
    pub fn new(store: Arc<dyn AccountStore>, hashing: PasswordHashing) -> Self {
        Self { store, hashing }
    }

    /// Validate, hash and persist a new account.
    pub async fn create(&self, username: &str, password: &str) -> Result<AccountRecord, AuthError> {
        validate(username, password)?;

        // Skips the hash for the common duplicate case. The insert below is
        // what actually enforces uniqueness.
        match self.store.find_by_username(username).await {
            Ok(_) => return Err(AuthError::AlreadyExists),
            Err(StoreError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }

        let password_hash = self.hashing.hash_blocking(password.to_owned()).await?;
        let record = AccountRecord::new(username.to_owned(), password_hash);
        Ok(self.store.insert_if_absent(record).await?)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<AccountRecord, AuthError> {
        Ok(self.store.find_by_username(username).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<AccountRecord, AuthError> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AuthError> {
        Ok(self.store.delete_by_id(id).await?)
    }

    pub async fn count(&self) -> Result<usize, AuthError> {
        Ok(self.store.count().await?)
    }
}

/// Check both fields and report every failure, username first.
pub fn validate(username: &str, password: &str) -> Result<(), AuthError> {
    let mut errors = Vec::new();

    if username.trim().is_empty() {
        errors.push(FieldError::required("username"));
    } else if username.trim() != username {
        errors.push(FieldError::new(
            "username",
            "The username must not begin or end with whitespace.",
        ));
    }

    if password.is_empty() {
        errors.push(FieldError::required("password"));
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("The password must consist of at least {MIN_PASSWORD_LENGTH} characters."),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthError::validation(errors))
    }
}
