//! Shared test helpers for store tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::storage::run_migrations;

/// Creates an in-memory database pool with migrations applied.
///
/// Limited to one connection: every new `sqlite::memory:` connection would
/// otherwise open its own empty database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a WAL database file under `dir` with migrations applied.
///
/// Unlike [`create_test_pool`], connections are real and concurrent, so
/// writers contend for the database lock the way they do in production.
pub async fn create_file_test_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let pool = crate::storage::init_db_pool_with_path(&dir.path().join("linkstash.db"))
        .await
        .expect("Failed to create file database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}
