//! Ordered provider chain with an "unknown" fallback.

use std::net::IpAddr;

use log::{debug, warn};

use super::providers::{GeoProvider, IpApiProvider, IpWhoIsProvider};
use super::types::GeoResult;

pub struct GeoResolver {
    providers: Vec<Box<dyn GeoProvider>>,
}

impl GeoResolver {
    pub fn new(providers: Vec<Box<dyn GeoProvider>>) -> Self {
        Self { providers }
    }

    /// ipapi.co first, ipwho.is as backup.
    pub fn with_default_providers(
        client: reqwest::Client,
        ipapi_base_url: &str,
        ipwhois_base_url: &str,
    ) -> Self {
        Self::new(vec![
            Box::new(IpApiProvider::new(client.clone(), ipapi_base_url)),
            Box::new(IpWhoIsProvider::new(client, ipwhois_base_url)),
        ])
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Asks each provider in order and returns the first success.
    ///
    /// Never fails: a malformed address, an empty chain or a chain where every
    /// provider failed all yield [`GeoResult::Unknown`].
    pub async fn resolve(&self, ip: &str) -> GeoResult {
        if ip.parse::<IpAddr>().is_err() {
            warn!("Skipping geolocation for malformed address {ip:?}");
            return GeoResult::Unknown;
        }

        for provider in &self.providers {
            match provider.lookup(ip).await {
                Ok(location) => {
                    debug!("Located {ip} via {}", provider.name());
                    return GeoResult::Located(location);
                }
                Err(e) => warn!("Geolocation via {} failed for {ip}: {e}", provider.name()),
            }
        }

        GeoResult::Unknown
    }
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("providers", &self.provider_names())
            .finish()
    }
}
