//! The login notification pipeline.

use std::sync::Arc;

use log::{info, warn};
use tokio::task::JoinHandle;

use super::client_ip::select_public_ip;
use super::message::compose;
use super::transport::{LogTransport, MailTransport, ResendTransport};
use super::types::LoginEvent;
use crate::config::Config;
use crate::geoip::{GeoResolver, GeoResult};

/// Turns login events into alerts: pick the public IP, geolocate it, compose,
/// send. Every failure along the way is logged and swallowed.
pub struct LoginNotifier {
    resolver: GeoResolver,
    transport: Arc<dyn MailTransport>,
}

impl LoginNotifier {
    pub fn new(resolver: GeoResolver, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    /// Default providers, and Resend when both the API key and the recipient
    /// are configured. Otherwise alerts only go to the log.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        let resolver = GeoResolver::with_default_providers(
            client.clone(),
            &config.ipapi_base_url,
            &config.ipwhois_base_url,
        );

        let transport: Arc<dyn MailTransport> = match config.mail_credentials() {
            Some((api_key, to)) => Arc::new(ResendTransport::new(
                client,
                config.resend_api_url.as_str(),
                api_key,
                config.email_from.as_str(),
                to,
            )),
            None => {
                warn!("RESEND_API_KEY or EMAIL_TO not set; login alerts will only be logged");
                Arc::new(LogTransport)
            }
        };

        Self::new(resolver, transport)
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Runs the whole pipeline for one event. Never fails.
    pub async fn notify(&self, event: LoginEvent) {
        let public_ip = select_public_ip(&event.forwarded_for);
        let location = match public_ip {
            Some(ip) => self.resolver.resolve(ip).await,
            None => GeoResult::Unknown,
        };

        let alert = compose(&event, public_ip, &location);
        match self.transport.send(&alert).await {
            Ok(()) => info!(
                "Login alert for '{}' sent via {}",
                event.username,
                self.transport.name()
            ),
            Err(e) => warn!(
                "Login alert for '{}' via {} failed: {e}",
                event.username,
                self.transport.name()
            ),
        }
    }

    /// Runs [`notify`](Self::notify) on a detached task.
    ///
    /// Callers are free to drop the handle; it is returned for tests.
    pub fn spawn(self: &Arc<Self>, event: LoginEvent) -> JoinHandle<()> {
        let notifier = Arc::clone(self);
        tokio::spawn(async move { notifier.notify(event).await })
    }
}

impl std::fmt::Debug for LoginNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginNotifier")
            .field("resolver", &self.resolver)
            .field("transport", &self.transport.name())
            .finish()
    }
}
