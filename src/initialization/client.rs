//! HTTP client initialization.
//!
//! One client is shared by the geolocation providers and the mail transport.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, USER_AGENT};

/// Initializes the outbound HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - the crate User-Agent
/// - the configured per-request timeout
///
/// The client is internally reference counted, so clones share one connection pool.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .user_agent(USER_AGENT)
        .build()
}
