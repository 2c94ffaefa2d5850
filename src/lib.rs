//! linkstash library: a small authenticated backend
//!
//! Provides a shared, deduplicated bookmark list, a threaded message board and
//! login alerts. Logins are checked against users configured in the
//! environment and answered with an HS256 bearer token; each successful login
//! fires a best-effort email alert that includes the client's approximate
//! location, looked up through a chain of public geolocation services.
//!
//! # Example
//!
//! ```no_run
//! use linkstash::{start_server, Config, StorageBackend};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     secret_key: "change-me".to_string(),
//!     storage: StorageBackend::Sqlite,
//!     users: linkstash::config::load_users_from_env(),
//!     ..Default::default()
//! };
//!
//! start_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod auth;
pub mod bookmarks;
pub mod config;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod messages;
pub mod notify;
pub mod server;
pub mod storage;

// Re-export public API
pub use bookmarks::{normalize, BookmarkStore};
pub use config::{Config, LogFormat, LogLevel, StorageBackend};
pub use error_handling::AppError;
pub use messages::{Message, MessageStore, SortOrder};
pub use server::{build_router, serve, start_server, AppState};
