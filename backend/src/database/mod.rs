//! Account storage.
//!
//! [`AccountStore`] is the seam between the repository logic and whatever
//! engine holds the records. Its `insert_if_absent` must be atomic: the
//! uniqueness violation it reports is the authoritative duplicate check, any
//! earlier lookup is only a shortcut. [`MemoryStore`] is the bundled engine.

pub mod models;
pub mod queries;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub use models::AccountRecord;
pub use queries::AccountRepository;

/// Failures reported by a storage engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("an account with this username already exists")]
    DuplicateUsername,
    #[error("account not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage operations over account records.
///
/// Every mutation is visible to all callers once the returned future resolves.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert `record` unless its username is taken, as one atomic step.
    async fn insert_if_absent(&self, record: AccountRecord) -> Result<AccountRecord, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<AccountRecord, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<AccountRecord, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Number of stored accounts.
    async fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Default)]
struct Tables {
    accounts: HashMap<Uuid, AccountRecord>,
    // Unique index: username -> id.
    usernames: HashMap<String, Uuid>,
}

/// In-process store. Both tables sit behind one lock so the uniqueness check
/// and the insert happen under the same write guard.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_if_absent(&self, record: AccountRecord) -> Result<AccountRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.usernames.contains_key(&record.username) {
            return Err(StoreError::DuplicateUsername);
        }
        tables.usernames.insert(record.username.clone(), record.id);
        tables.accounts.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<AccountRecord, StoreError> {
        let tables = self.tables.read().await;
        tables
            .usernames
            .get(username)
            .and_then(|id| tables.accounts.get(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<AccountRecord, StoreError> {
        let tables = self.tables.read().await;
        tables.accounts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let record = tables.accounts.remove(&id).ok_or(StoreError::NotFound)?;
        tables.usernames.remove(&record.username);
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().await.accounts.len())
    }
}
