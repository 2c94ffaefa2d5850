//! Threaded message board.
//!
//! Messages get store-assigned, strictly increasing ids. A reply names its
//! parent, which must exist at creation time. Deleting a message also deletes
//! its direct replies; deeper descendants are kept.

mod file;
mod memory;
mod sqlite;
mod types;

use std::path::Path;

use sqlx::SqlitePool;

pub use file::FileMessages;
pub use memory::{BoardState, MemoryMessages};
pub use sqlite::SqliteMessages;
pub use types::{Message, SortOrder};

use crate::error_handling::StoreError;

/// The message store selected at startup.
#[derive(Debug)]
pub enum MessageStore {
    Memory(MemoryMessages),
    File(FileMessages),
    Sqlite(SqliteMessages),
}

impl MessageStore {
    pub fn in_memory() -> Self {
        MessageStore::Memory(MemoryMessages::new())
    }

    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(MessageStore::File(FileMessages::open(path).await?))
    }

    pub fn sqlite(pool: SqlitePool) -> Self {
        MessageStore::Sqlite(SqliteMessages::new(pool))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            MessageStore::Memory(_) => "memory",
            MessageStore::File(_) => "file",
            MessageStore::Sqlite(_) => "sqlite",
        }
    }

    pub async fn list(&self, order: SortOrder) -> Result<Vec<Message>, StoreError> {
        match self {
            MessageStore::Memory(store) => Ok(store.list(order).await),
            MessageStore::File(store) => Ok(store.list(order).await),
            MessageStore::Sqlite(store) => store.list(order).await,
        }
    }

    /// Posts `content`, optionally as a reply to `parent_id`.
    ///
    /// Fails with [`StoreError::ParentNotFound`] if the parent does not exist.
    pub async fn create(
        &self,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Message, StoreError> {
        match self {
            MessageStore::Memory(store) => store.create(content.to_string(), parent_id).await,
            MessageStore::File(store) => store.create(content.to_string(), parent_id).await,
            MessageStore::Sqlite(store) => store.create(content, parent_id).await,
        }
    }

    pub async fn like(&self, id: i64) -> Result<Option<Message>, StoreError> {
        match self {
            MessageStore::Memory(store) => Ok(store.like(id).await),
            MessageStore::File(store) => store.like(id).await,
            MessageStore::Sqlite(store) => store.like(id).await,
        }
    }

    /// Number of messages removed, or `None` if `id` does not exist.
    pub async fn delete(&self, id: i64) -> Result<Option<usize>, StoreError> {
        match self {
            MessageStore::Memory(store) => Ok(store.delete(id).await),
            MessageStore::File(store) => store.delete(id).await,
            MessageStore::Sqlite(store) => store.delete(id).await,
        }
    }
}
