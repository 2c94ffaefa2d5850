//! Geolocation data structures.

use std::fmt;

use crate::config::{UNKNOWN_ISP, UNKNOWN_LOCATION};

/// Placeholder for a region or country a provider left out.
const UNKNOWN_PART: &str = "Unknown";

/// A successful lookup. Providers only return one when a city is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    pub city: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub isp: Option<String>,
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {} (ISP: {})",
            self.city,
            self.region.as_deref().unwrap_or(UNKNOWN_PART),
            self.country.as_deref().unwrap_or(UNKNOWN_PART),
            self.isp.as_deref().unwrap_or(UNKNOWN_ISP)
        )
    }
}

/// Outcome of resolving an address through the provider chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeoResult {
    Located(GeoLocation),
    /// No public address, or every provider failed.
    #[default]
    Unknown,
}

impl GeoResult {
    pub fn is_known(&self) -> bool {
        matches!(self, GeoResult::Located(_))
    }
}

impl fmt::Display for GeoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoResult::Located(location) => location.fmt(f),
            GeoResult::Unknown => f.write_str(UNKNOWN_LOCATION),
        }
    }
}

/// Treats missing and blank strings alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
