//! Error handling.
//!
//! This module provides the error types for every concern in the service:
//! - **HTTP**: [`AppError`], the only error a client ever sees
//! - **Stores**: [`StoreError`] for the bookmark and message backends
//! - **Auth**: [`AuthError`] for password hashing and bearer tokens
//! - **Notification**: [`GeoError`] and [`MailError`], logged and discarded
//! - **Startup**: [`InitializationError`] and [`DatabaseError`]

mod app;
mod types;

// Re-export public API
pub use app::AppError;
pub use types::{
    AuthError, DatabaseError, GeoError, InitializationError, MailError, StoreError,
};
