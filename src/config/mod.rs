//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, timeouts, provider endpoints)
//! - CLI/environment option types and parsing
//! - User credential loading from `USER_{n}_*` variables

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    collect_users, load_users_from_env, Config, LogFormat, LogLevel, StorageBackend,
    UserCredentials,
};
