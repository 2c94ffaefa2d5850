use chrono::Local;

use crate::config::LOGIN_TIMESTAMP_FORMAT;

/// A successful authentication, captured at login time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginEvent {
    pub username: String,
    /// Local civic time, already formatted for display.
    pub timestamp: String,
    /// Raw comma-separated address chain, client first.
    pub forwarded_for: String,
}

impl LoginEvent {
    /// Stamps the event with the current local time.
    pub fn now(username: impl Into<String>, forwarded_for: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            timestamp: Local::now().format(LOGIN_TIMESTAMP_FORMAT).to_string(),
            forwarded_for: forwarded_for.into(),
        }
    }
}

/// A composed alert, ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAlert {
    pub subject: String,
    pub text: String,
}
