//! Mail transports for login alerts.

use futures::future::{BoxFuture, FutureExt};
use log::info;
use serde::Serialize;

use super::types::LoginAlert;
use crate::error_handling::MailError;

/// Delivers a composed alert.
pub trait MailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    fn send<'a>(&'a self, alert: &'a LoginAlert) -> BoxFuture<'a, Result<(), MailError>>;
}

/// Resend transactional email API.
pub struct ResendTransport {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl ResendTransport {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

impl MailTransport for ResendTransport {
    fn name(&self) -> &'static str {
        "resend"
    }

    fn send<'a>(&'a self, alert: &'a LoginAlert) -> BoxFuture<'a, Result<(), MailError>> {
        async move {
            let email = ResendEmail {
                from: &self.from,
                to: &self.to,
                subject: &alert.subject,
                text: &alert.text,
            };

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&email)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "No error details".to_string());
                return Err(MailError::Rejected {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(())
        }
        .boxed()
    }
}

/// Writes alerts to the log instead of sending them.
#[derive(Debug, Default)]
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    fn send<'a>(&'a self, alert: &'a LoginAlert) -> BoxFuture<'a, Result<(), MailError>> {
        info!("{}\n{}", alert.subject, alert.text);
        futures::future::ready(Ok(())).boxed()
    }
}
