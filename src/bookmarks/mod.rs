//! Shared bookmark list.
//!
//! A deduplicated, insertion-ordered list of normalized URLs. Three backends
//! exist and behave identically from the outside:
//!
//! - **memory**: a `Vec` behind a lock; nothing survives a restart
//! - **file**: one JSON array, loaded at startup and rewritten on every mutation
//! - **sqlite**: a table with a UNIQUE constraint on the normalized URL
//!
//! Normalization happens here, once, before any backend sees a URL. Stored
//! values are therefore always canonical and the read path returns them as-is.

mod file;
mod memory;
mod normalize;
mod sqlite;

use std::path::Path;

use sqlx::SqlitePool;

pub use file::FileBookmarks;
pub use memory::MemoryBookmarks;
pub use normalize::normalize;
pub use sqlite::SqliteBookmarks;

use crate::error_handling::StoreError;

/// The bookmark store selected at startup.
#[derive(Debug)]
pub enum BookmarkStore {
    Memory(MemoryBookmarks),
    File(FileBookmarks),
    Sqlite(SqliteBookmarks),
}

impl BookmarkStore {
    /// Creates an empty process-memory store.
    pub fn in_memory() -> Self {
        BookmarkStore::Memory(MemoryBookmarks::new())
    }

    /// Opens (or lazily creates) the JSON document at `path`.
    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(BookmarkStore::File(FileBookmarks::open(path).await?))
    }

    /// Uses the `bookmarks` table of an already migrated database.
    pub fn sqlite(pool: SqlitePool) -> Self {
        BookmarkStore::Sqlite(SqliteBookmarks::new(pool))
    }

    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            BookmarkStore::Memory(_) => "memory",
            BookmarkStore::File(_) => "file",
            BookmarkStore::Sqlite(_) => "sqlite",
        }
    }

    /// All bookmarks in insertion order.
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        match self {
            BookmarkStore::Memory(store) => Ok(store.list().await),
            BookmarkStore::File(store) => Ok(store.list().await),
            BookmarkStore::Sqlite(store) => store.list().await,
        }
    }

    /// Adds `raw_url` unless its normalized form is already present.
    ///
    /// Returns whether an entry was inserted.
    pub async fn add(&self, raw_url: &str) -> Result<bool, StoreError> {
        let url = normalize(raw_url);
        match self {
            BookmarkStore::Memory(store) => Ok(store.add(url).await),
            BookmarkStore::File(store) => store.add(url).await,
            BookmarkStore::Sqlite(store) => store.add(&url).await,
        }
    }

    /// Removes the entry matching the normalized form of `raw_url`.
    ///
    /// Returns `false` when nothing matched.
    pub async fn remove(&self, raw_url: &str) -> Result<bool, StoreError> {
        let url = normalize(raw_url);
        match self {
            BookmarkStore::Memory(store) => Ok(store.remove(&url).await),
            BookmarkStore::File(store) => store.remove(&url).await,
            BookmarkStore::Sqlite(store) => store.remove(&url).await,
        }
    }
}
