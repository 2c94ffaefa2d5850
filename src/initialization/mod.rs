//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - Outbound HTTP client (geolocation providers and mail)
//!
//! Stores and the notifier are assembled from these in [`crate::server::AppState`].

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
