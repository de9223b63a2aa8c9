//! Storage seam used by the HTTP layer and the CLI.

use async_trait::async_trait;

use animo_core::entities::{Entry, NewEntry};
use animo_core::range::TimeRange;

use crate::AnimoDb;
use crate::error::DatabaseError;

/// Per-user entry storage.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Entries owned by `user_id` whose event time falls in `range`, newest first.
    async fn fetch(&self, user_id: &str, range: TimeRange) -> Result<Vec<Entry>, DatabaseError>;

    /// Validate and persist a new entry.
    async fn insert(&self, user_id: &str, entry: &NewEntry) -> Result<Entry, DatabaseError>;

    /// Delete all entries owned by `user_id`.
    async fn delete_for_user(&self, user_id: &str) -> Result<u64, DatabaseError>;
}

#[async_trait]
impl EntryStore for AnimoDb {
    async fn fetch(&self, user_id: &str, range: TimeRange) -> Result<Vec<Entry>, DatabaseError> {
        self.list_entries(user_id, range).await
    }

    async fn insert(&self, user_id: &str, entry: &NewEntry) -> Result<Entry, DatabaseError> {
        self.insert_entry(user_id, entry).await
    }

    async fn delete_for_user(&self, user_id: &str) -> Result<u64, DatabaseError> {
        self.delete_user_entries(user_id).await
    }
}
