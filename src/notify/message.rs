//! Login alert composition.

use super::types::{LoginAlert, LoginEvent};
use crate::geoip::GeoResult;

/// Builds the alert for `event`.
///
/// The IP line shows the selected public address, or the raw forwarded chain
/// when no public address was found.
pub fn compose(event: &LoginEvent, public_ip: Option<&str>, location: &GeoResult) -> LoginAlert {
    let ip = public_ip.unwrap_or(&event.forwarded_for);
    LoginAlert {
        subject: format!("🔐 Login Alert: {}", event.username),
        text: format!(
            "User \"{}\" logged in at {}\nIP: {}\nLocation: {}",
            event.username, event.timestamp, ip, location
        ),
    }
}
