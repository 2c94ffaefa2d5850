//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line/environment
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::warn;

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Where bookmarks and messages are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// Process memory only; everything is lost on restart
    Memory,
    /// One JSON document per collection, rewritten on every mutation
    File,
    /// SQLite database with uniqueness enforced by the schema
    Sqlite,
}

/// A username/password pair read from the environment.
///
/// Only lives until the user directory has hashed the password.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Server configuration.
///
/// Every option can be given on the command line or through the environment
/// (a `.env` file is loaded by the binary before parsing). Users are not CLI
/// options; they are filled in from `USER_{n}_USERNAME` / `USER_{n}_PASSWORD`
/// via [`load_users_from_env`].
#[derive(Clone, Parser)]
#[command(name = "linkstash", version, about = "Authenticated bookmark and message board backend")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind to
    #[arg(long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// Shared secret used to sign bearer tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Storage backend for bookmarks and messages
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::File)]
    pub storage: StorageBackend,

    /// Bookmark document (file backend)
    #[arg(long, env = "BOOKMARKS_FILE", default_value = DEFAULT_BOOKMARKS_FILE)]
    pub bookmarks_file: PathBuf,

    /// Message board document (file backend)
    #[arg(long, env = "MESSAGES_FILE", default_value = DEFAULT_MESSAGES_FILE)]
    pub messages_file: PathBuf,

    /// Database path (sqlite backend)
    #[arg(long, env = "DB_PATH", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Timeout for outbound geolocation and mail requests
    #[arg(long, env = "HTTP_TIMEOUT_SECONDS", default_value_t = HTTP_TIMEOUT_SECS)]
    pub http_timeout_seconds: u64,

    /// Lifetime of issued bearer tokens
    #[arg(long, env = "TOKEN_TTL_SECONDS", default_value_t = TOKEN_TTL_SECS)]
    pub token_ttl_seconds: u64,

    /// PBKDF2 iterations used when hashing configured passwords
    #[arg(long, env = "PBKDF2_ITERATIONS", default_value_t = PBKDF2_ITERATIONS)]
    pub pbkdf2_iterations: u32,

    /// Resend API key; login alerts are only logged when unset
    #[arg(long, env = "RESEND_API_KEY", hide_env_values = true)]
    pub resend_api_key: Option<String>,

    /// Recipient of login alerts
    #[arg(long, env = "EMAIL_TO")]
    pub email_to: Option<String>,

    /// Sender of login alerts
    #[arg(long, env = "EMAIL_FROM", default_value = DEFAULT_EMAIL_FROM)]
    pub email_from: String,

    /// Resend email endpoint
    #[arg(long, env = "RESEND_API_URL", default_value = RESEND_API_URL)]
    pub resend_api_url: String,

    /// Primary geolocation provider
    #[arg(long, env = "IPAPI_BASE_URL", default_value = IPAPI_BASE_URL)]
    pub ipapi_base_url: String,

    /// Backup geolocation provider
    #[arg(long, env = "IPWHOIS_BASE_URL", default_value = IPWHOIS_BASE_URL)]
    pub ipwhois_base_url: String,

    /// Users allowed to log in
    #[arg(skip)]
    pub users: Vec<UserCredentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            secret_key: String::new(),
            storage: StorageBackend::File,
            bookmarks_file: PathBuf::from(DEFAULT_BOOKMARKS_FILE),
            messages_file: PathBuf::from(DEFAULT_MESSAGES_FILE),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            http_timeout_seconds: HTTP_TIMEOUT_SECS,
            token_ttl_seconds: TOKEN_TTL_SECS,
            pbkdf2_iterations: PBKDF2_ITERATIONS,
            resend_api_key: None,
            email_to: None,
            email_from: DEFAULT_EMAIL_FROM.to_string(),
            resend_api_url: RESEND_API_URL.to_string(),
            ipapi_base_url: IPAPI_BASE_URL.to_string(),
            ipwhois_base_url: IPWHOIS_BASE_URL.to_string(),
            users: Vec::new(),
        }
    }
}

impl Config {
    /// Returns the `(api_key, recipient)` pair when email delivery is fully configured.
    pub fn mail_credentials(&self) -> Option<(&str, &str)> {
        let key = self.resend_api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let to = self.email_to.as_deref().filter(|t| !t.trim().is_empty())?;
        Some((key, to))
    }
}

/// Reads `USER_1_USERNAME`/`USER_1_PASSWORD`, `USER_2_...` from the process
/// environment until the first missing pair.
pub fn load_users_from_env() -> Vec<UserCredentials> {
    collect_users(|key| std::env::var(key).ok())
}

/// Collects numbered user credentials through `lookup`.
///
/// Numbering starts at 1 and stops at the first index where either variable is
/// absent. Entries with an empty username or password are skipped with a
/// warning. Usernames are kept exactly as given; login compares them verbatim.
pub fn collect_users<F>(lookup: F) -> Vec<UserCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let mut users = Vec::new();
    for index in 1.. {
        let username = lookup(&format!("{USER_ENV_PREFIX}{index}_USERNAME"));
        let password = lookup(&format!("{USER_ENV_PREFIX}{index}_PASSWORD"));
        let (Some(username), Some(password)) = (username, password) else {
            break;
        };

        if username.is_empty() || password.is_empty() {
            warn!("Skipping {USER_ENV_PREFIX}{index}_*: username and password must both be non-empty");
            continue;
        }
        users.push(UserCredentials { username, password });
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.token_ttl_seconds, 3600);
        assert_eq!(config.bookmarks_file, PathBuf::from("./bookmarks.json"));
        assert!(config.users.is_empty());
        assert!(config.mail_credentials().is_none());
    }

    #[test]
    fn test_config_parses_cli_arguments() {
        let config = Config::try_parse_from([
            "linkstash",
            "--secret-key",
            "s3cret",
            "--port",
            "8080",
            "--storage",
            "sqlite",
        ])
        .expect("arguments should parse");
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Sqlite);
        assert_eq!(config.secret_key, "s3cret");
    }

    #[test]
    fn test_mail_credentials_require_key_and_recipient() {
        let mut config = Config {
            resend_api_key: Some("re_123".to_string()),
            ..Default::default()
        };
        assert!(config.mail_credentials().is_none());

        config.email_to = Some("   ".to_string());
        assert!(config.mail_credentials().is_none());

        config.email_to = Some("ops@example.com".to_string());
        assert_eq!(
            config.mail_credentials(),
            Some(("re_123", "ops@example.com"))
        );
    }

    #[test]
    fn test_collect_users_stops_at_first_gap() {
        let users = collect_users(lookup_from(&[
            ("USER_1_USERNAME", "alice"),
            ("USER_1_PASSWORD", "wonderland"),
            ("USER_2_USERNAME", "bob"),
            ("USER_2_PASSWORD", "builder"),
            ("USER_4_USERNAME", "dave"),
            ("USER_4_PASSWORD", "unreachable"),
        ]));
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_collect_users_skips_empty_entries_and_keeps_names_verbatim() {
        let users = collect_users(lookup_from(&[
            ("USER_1_USERNAME", ""),
            ("USER_1_PASSWORD", "x"),
            ("USER_2_USERNAME", " carol "),
            ("USER_2_PASSWORD", "pw"),
            ("USER_3_USERNAME", "dave"),
            ("USER_3_PASSWORD", ""),
        ]));
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, " carol ");
    }

    #[test]
    fn test_collect_users_requires_both_variables() {
        let users = collect_users(lookup_from(&[("USER_1_USERNAME", "alice")]));
        assert!(users.is_empty());
    }

    #[test]
    fn test_user_credentials_debug_hides_password() {
        let creds = UserCredentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
