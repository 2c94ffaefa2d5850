// storage/mod.rs
// Persistence plumbing shared by the bookmark and message stores

pub mod json_file;
pub mod migrations;
pub mod pool;

// Re-export commonly used items
pub use json_file::{load_document, write_document};
pub use migrations::run_migrations;
pub use pool::init_db_pool_with_path;

/// Current wall-clock time in epoch milliseconds, as stored in SQLite rows.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
pub(crate) mod test_helpers;
