//! SQLite message table.

use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::types::{Message, SortOrder};
use crate::error_handling::StoreError;
use crate::storage::now_millis;

const MESSAGE_COLUMNS: &str = "id, content, parent_id, likes, created_at_ms";

#[derive(Debug, Clone)]
pub struct SqliteMessages {
    pool: SqlitePool,
}

fn message_from_row(row: &SqliteRow) -> Message {
    let created_at_ms: i64 = row.get("created_at_ms");
    Message {
        id: row.get("id"),
        content: row.get("content"),
        parent_id: row.get("parent_id"),
        likes: row.get("likes"),
        created_at: DateTime::from_timestamp_millis(created_at_ms).unwrap_or_default(),
    }
}

impl SqliteMessages {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, order: SortOrder) -> Result<Vec<Message>, StoreError> {
        let direction = match order {
            SortOrder::Oldest => "ASC",
            SortOrder::Newest => "DESC",
        };
        let sql = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             ORDER BY created_at_ms {direction}, id {direction}"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(message_from_row).collect())
    }

    /// Inserts a message in one statement. The parent check is part of the
    /// insert, so no row comes back when the parent does not exist.
    pub async fn create(
        &self,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Message, StoreError> {
        let row = sqlx::query(&format!(
            "INSERT INTO messages (content, parent_id, likes, created_at_ms)
             SELECT ?, ?, 0, ?
             WHERE ? IS NULL OR EXISTS (SELECT 1 FROM messages WHERE id = ?)
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(content)
        .bind(parent_id)
        .bind(now_millis())
        .bind(parent_id)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await?;

        match (row, parent_id) {
            (Some(row), _) => Ok(message_from_row(&row)),
            (None, Some(parent)) => Err(StoreError::ParentNotFound(parent)),
            (None, None) => Err(StoreError::Database(sqlx::Error::RowNotFound)),
        }
    }

    pub async fn like(&self, id: i64) -> Result<Option<Message>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE messages SET likes = likes + 1 WHERE id = ?
             RETURNING {MESSAGE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(message_from_row))
    }

    /// Deletes `id` and its direct replies in one statement.
    ///
    /// Replies only match while `id` itself exists, so a second delete of the
    /// same id never touches replies of replies left behind by the first.
    pub async fn delete(&self, id: i64) -> Result<Option<usize>, StoreError> {
        let deleted: Vec<i64> = sqlx::query_scalar(
            "DELETE FROM messages
             WHERE id = ?
                OR (parent_id = ? AND EXISTS (SELECT 1 FROM messages WHERE id = ?))
             RETURNING id",
        )
        .bind(id)
        .bind(id)
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        if deleted.is_empty() {
            return Ok(None);
        }
        Ok(Some(deleted.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_file_test_pool, create_test_pool};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_and_list() {
        let store = SqliteMessages::new(create_test_pool().await);
        let first = store.create("first", None).await.expect("create");
        let second = store.create("second", Some(first.id)).await.expect("create");

        assert_eq!(first.likes, 0);
        assert_eq!(second.parent_id, Some(first.id));
        assert!(second.id > first.id);

        let oldest = store.list(SortOrder::Oldest).await.expect("list");
        let ids: Vec<i64> = oldest.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let newest = store.list(SortOrder::Newest).await.expect("list");
        let ids: Vec<i64> = newest.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_unknown_parent_inserts_nothing() {
        let store = SqliteMessages::new(create_test_pool().await);
        let result = store.create("orphan", Some(77)).await;
        assert!(matches!(result, Err(StoreError::ParentNotFound(77))));
        assert!(store.list(SortOrder::Oldest).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_like_returns_updated_row() {
        let store = SqliteMessages::new(create_test_pool().await);
        let m = store.create("likeable", None).await.expect("create");

        let liked = store.like(m.id).await.expect("like").expect("exists");
        assert_eq!(liked.likes, 1);
        assert_eq!(liked.content, "likeable");
        assert!(store.like(m.id + 100).await.expect("like").is_none());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_direct_replies() {
        let store = SqliteMessages::new(create_test_pool().await);
        let root = store.create("root", None).await.expect("create");
        let reply = store.create("reply", Some(root.id)).await.expect("create");
        store.create("reply 2", Some(root.id)).await.expect("create");
        let nested = store.create("nested", Some(reply.id)).await.expect("create");

        assert_eq!(store.delete(root.id).await.expect("delete"), Some(3));
        let remaining = store.list(SortOrder::Oldest).await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, nested.id);

        assert_eq!(store.delete(root.id).await.expect("delete"), None);
    }

    #[tokio::test]
    async fn test_second_delete_leaves_nested_replies_alone() {
        let store = SqliteMessages::new(create_test_pool().await);
        let root = store.create("root", None).await.expect("create");
        let reply = store.create("reply", Some(root.id)).await.expect("create");
        store.create("nested", Some(reply.id)).await.expect("create");

        assert_eq!(store.delete(root.id).await.expect("delete"), Some(2));
        assert_eq!(store.delete(reply.id).await.expect("delete"), None);
        assert_eq!(store.list(SortOrder::Oldest).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_replies_on_file_database() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteMessages::new(create_file_test_pool(&dir).await);
        let root = store.create("root", None).await.expect("create");

        let replies = (0..50).map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.create(&format!("r{i}"), Some(root.id)).await })
        });
        for handle in futures::future::join_all(replies).await {
            let reply = handle.expect("task panicked").expect("reply must succeed");
            assert_eq!(reply.parent_id, Some(root.id));
        }

        let all = store.list(SortOrder::Oldest).await.expect("list");
        assert_eq!(all.len(), 51);

        assert_eq!(store.delete(root.id).await.expect("delete"), Some(51));
    }

    #[tokio::test]
    async fn test_concurrent_likes_on_file_database() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let store = SqliteMessages::new(create_file_test_pool(&dir).await);
        let m = store.create("popular", None).await.expect("create");

        let likes = (0..20).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.like(m.id).await })
        });
        for handle in futures::future::join_all(likes).await {
            handle.expect("task panicked").expect("like must succeed");
        }

        let liked = store.like(m.id).await.expect("like").expect("exists");
        assert_eq!(liked.likes, 21);
    }
}
