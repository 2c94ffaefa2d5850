//! SQLite bookmark table.
//!
//! Uniqueness lives in the schema (`url TEXT NOT NULL UNIQUE`), so concurrent
//! inserts of the same URL resolve through `ON CONFLICT DO NOTHING` and removal
//! is one `DELETE` whose affected-row count doubles as the existence check.

use sqlx::SqlitePool;

use crate::error_handling::StoreError;
use crate::storage::now_millis;

#[derive(Debug, Clone)]
pub struct SqliteBookmarks {
    pool: SqlitePool,
}

impl SqliteBookmarks {
    /// Wraps a pool whose migrations have already been applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let urls = sqlx::query_scalar::<_, String>("SELECT url FROM bookmarks ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(urls)
    }

    pub async fn add(&self, url: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (url, created_at_ms) VALUES (?, ?)
             ON CONFLICT(url) DO NOTHING",
        )
        .bind(url)
        .bind(now_millis())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn remove(&self, url: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE url = ?")
            .bind(url)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
