//! Configuration constants.
//!
//! This module defines the defaults and fixed parameters used throughout the
//! application: listen address, storage locations, timeouts, auth parameters
//! and the outbound provider endpoints.

// Server defaults
/// Port the HTTP server listens on unless `PORT` is set
pub const DEFAULT_PORT: u16 = 3000;
/// Interface the HTTP server binds to
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
/// Max age advertised to browsers for CORS preflight caching (1 hour)
pub const CORS_MAX_AGE_SECS: u64 = 60 * 60;

// Storage defaults
/// JSON document holding the bookmark list (file backend)
pub const DEFAULT_BOOKMARKS_FILE: &str = "./bookmarks.json";
/// JSON document holding the message board (file backend)
pub const DEFAULT_MESSAGES_FILE: &str = "./messages.json";
/// SQLite database path (sqlite backend)
pub const DEFAULT_DB_PATH: &str = "./linkstash.db";

// Outbound HTTP
/// Per-request timeout for geolocation and mail provider calls
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// User-Agent sent with every outbound request
pub const USER_AGENT: &str = concat!("linkstash/", env!("CARGO_PKG_VERSION"));

// Auth
/// Lifetime of an issued bearer token (1 hour)
pub const TOKEN_TTL_SECS: u64 = 60 * 60;
/// PBKDF2-HMAC-SHA256 iteration count for password hashes
pub const PBKDF2_ITERATIONS: u32 = 100_000;
/// Environment variable prefix for configured users (`USER_1_USERNAME`, ...)
pub const USER_ENV_PREFIX: &str = "USER_";

// Geolocation providers
/// Primary geolocation provider (`GET {base}/{ip}/json/`)
pub const IPAPI_BASE_URL: &str = "https://ipapi.co";
/// Backup geolocation provider (`GET {base}/{ip}`)
pub const IPWHOIS_BASE_URL: &str = "https://ipwho.is";
/// Address prefixes treated as private when picking the public client IP
pub const PRIVATE_IP_PREFIXES: &[&str] = &["10.", "172.", "192.168."];
/// Rendering of a failed or skipped location lookup
pub const UNKNOWN_LOCATION: &str = "Unknown location";
/// Placeholder when a provider reports no ISP
pub const UNKNOWN_ISP: &str = "Unknown ISP";

// Mail
/// Resend transactional email endpoint
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";
/// Sender used for login alerts
pub const DEFAULT_EMAIL_FROM: &str = "Login Bot <onboarding@resend.dev>";
/// Local civic time format used in login alerts
pub const LOGIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";
