//! HTTP geolocation providers.

use futures::future::{BoxFuture, FutureExt};
use serde::Deserialize;

use super::types::{non_blank, GeoLocation};
use crate::error_handling::GeoError;

/// One source in the geolocation chain.
pub trait GeoProvider: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    fn lookup<'a>(&'a self, ip: &'a str) -> BoxFuture<'a, Result<GeoLocation, GeoError>>;
}

/// Sends a GET and decodes a JSON body, failing on non-2xx statuses.
async fn get_json<T: for<'de> Deserialize<'de>>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, GeoError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeoError::Status(status.as_u16()));
    }
    Ok(response.json::<T>().await?)
}

fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// ipapi.co: `GET {base}/{ip}/json/`.
pub struct IpApiProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    org: Option<String>,
}

impl IpApiProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }
}

impl GeoProvider for IpApiProvider {
    fn name(&self) -> &'static str {
        "ipapi.co"
    }

    fn lookup<'a>(&'a self, ip: &'a str) -> BoxFuture<'a, Result<GeoLocation, GeoError>> {
        async move {
            let url = format!("{}/{ip}/json/", self.base_url);
            let body: IpApiResponse = get_json(&self.client, &url).await?;

            if body.error {
                return Err(GeoError::Rejected(
                    body.reason.unwrap_or_else(|| "error flag set".to_string()),
                ));
            }
            let city = non_blank(body.city).ok_or(GeoError::MissingCity)?;

            Ok(GeoLocation {
                city,
                region: non_blank(body.region),
                country: non_blank(body.country_name),
                isp: non_blank(body.org),
            })
        }
        .boxed()
    }
}

/// ipwho.is: `GET {base}/{ip}`.
pub struct IpWhoIsProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct IpWhoIsResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    connection: Option<IpWhoIsConnection>,
}

#[derive(Debug, Deserialize)]
struct IpWhoIsConnection {
    isp: Option<String>,
}

impl IpWhoIsProvider {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }
}

impl GeoProvider for IpWhoIsProvider {
    fn name(&self) -> &'static str {
        "ipwho.is"
    }

    fn lookup<'a>(&'a self, ip: &'a str) -> BoxFuture<'a, Result<GeoLocation, GeoError>> {
        async move {
            let url = format!("{}/{ip}", self.base_url);
            let body: IpWhoIsResponse = get_json(&self.client, &url).await?;

            if !body.success {
                return Err(GeoError::Rejected(
                    body.message.unwrap_or_else(|| "success flag not set".to_string()),
                ));
            }
            let city = non_blank(body.city).ok_or(GeoError::MissingCity)?;

            Ok(GeoLocation {
                city,
                region: non_blank(body.region),
                country: non_blank(body.country),
                isp: non_blank(body.connection.and_then(|c| c.isp)),
            })
        }
        .boxed()
    }
}
