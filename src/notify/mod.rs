//! Login notifications.
//!
//! Every successful login produces one [`LoginEvent`]. The [`LoginNotifier`]
//! picks the first public address from the forwarded chain, geolocates it,
//! composes an alert and hands it to a [`MailTransport`]. The pipeline runs on
//! a detached task and never reports errors back to the login request.

mod client_ip;
mod message;
mod notifier;
mod transport;
mod types;

pub use client_ip::{is_private_candidate, select_public_ip};
pub use message::compose;
pub use notifier::LoginNotifier;
pub use transport::{LogTransport, MailTransport, ResendTransport};
pub use types::{LoginAlert, LoginEvent};
