//! Error type definitions.
//!
//! This module defines the error types used throughout the application, grouped
//! by concern. Only [`AppError`] ever reaches an HTTP client; the others are
//! converted (or, for the notification pipeline, logged and dropped).

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database setup.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

/// Error types for bookmark and message stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing a store document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A store document exists but is not valid JSON for its collection.
    #[error("Malformed store document {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be serialized for writing.
    #[error("Failed to serialize store document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// SQL execution error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A reply referenced a message that does not exist.
    #[error("Parent message {0} not found")]
    ParentNotFound(i64),
}

/// Error types for password hashing and bearer tokens.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Tokens cannot be signed with an empty key.
    #[error("Secret key must not be empty")]
    EmptySecret,

    /// PBKDF2 needs at least one iteration.
    #[error("PBKDF2 iteration count must be greater than zero")]
    InvalidIterations,

    /// The system random source failed while generating a salt.
    #[error("Failed to generate password salt")]
    RandomGeneration,

    /// The blocking password verification task did not complete.
    #[error("Password verification task failed: {0}")]
    HashTask(String),

    /// The token is not three base64url segments with JSON header and claims.
    #[error("Malformed token")]
    MalformedToken,

    /// The token header names an algorithm other than HS256.
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature does not match the header and claims.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// The token's `exp` is in the past.
    #[error("Token expired")]
    Expired,

    /// Claims could not be serialized while issuing a token.
    #[error("Token encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Error types for a single geolocation provider lookup.
///
/// These never leave the resolver; each one moves the chain on to the next provider.
#[derive(Error, Debug)]
pub enum GeoError {
    /// Network, timeout or body decoding failure.
    #[error("Request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The provider answered with a non-success HTTP status.
    #[error("Provider returned HTTP {0}")]
    Status(u16),

    /// The provider answered but flagged the lookup as failed.
    #[error("Provider rejected lookup: {0}")]
    Rejected(String),

    /// The provider answered without a city.
    #[error("Provider response has no city")]
    MissingCity,
}

/// Error types for outbound mail delivery.
#[derive(Error, Debug)]
pub enum MailError {
    /// Network or timeout failure talking to the mail provider.
    #[error("Mail request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The mail provider refused the message.
    #[error("Mail provider returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}
