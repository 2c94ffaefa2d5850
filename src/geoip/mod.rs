//! IP geolocation through public lookup services.
//!
//! Lookups go through an ordered chain of HTTP providers (ipapi.co, then
//! ipwho.is). The first provider that returns a city wins; if none does, the
//! result is [`GeoResult::Unknown`]. Failures are logged and never surface to
//! the caller.

mod providers;
mod resolver;
mod types;

pub use providers::{GeoProvider, IpApiProvider, IpWhoIsProvider};
pub use resolver::GeoResolver;
pub use types::{GeoLocation, GeoResult};
