// Shared test helpers for driving the real router over a loopback socket.
//
// Each test gets its own server on 127.0.0.1:0 with memory stores, one
// configured user and a mail transport that forwards alerts to a channel.

#![allow(dead_code)] // Not every test file uses every helper

use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

use linkstash::auth::{TokenSigner, UserDirectory};
use linkstash::config::UserCredentials;
use linkstash::error_handling::MailError;
use linkstash::geoip::GeoResolver;
use linkstash::notify::{LoginAlert, LoginNotifier, MailTransport};
use linkstash::{serve, AppState, BookmarkStore, MessageStore};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "wonderland";
pub const SECRET: &str = "integration-test-secret";

/// Low iteration count keeps startup fast; verification logic is unchanged.
pub const TEST_ITERATIONS: u32 = 1_000;

/// Forwards every alert to a channel instead of sending it.
pub struct ChannelTransport {
    tx: UnboundedSender<LoginAlert>,
}

impl MailTransport for ChannelTransport {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn send<'a>(&'a self, alert: &'a LoginAlert) -> BoxFuture<'a, Result<(), MailError>> {
        let _ = self.tx.send(alert.clone());
        futures::future::ready(Ok(())).boxed()
    }
}

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub alerts: UnboundedReceiver<LoginAlert>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to send login request")
    }

    /// Logs in as the configured user and returns the bearer token.
    pub async fn token(&self) -> String {
        let response = self.login(USERNAME, PASSWORD).await;
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = response.json().await.expect("login body");
        body["token"]
            .as_str()
            .expect("token field")
            .to_string()
    }

    /// Waits for the next alert from the detached notification task.
    pub async fn next_alert(&mut self) -> LoginAlert {
        tokio::time::timeout(Duration::from_secs(5), self.alerts.recv())
            .await
            .expect("Timed out waiting for login alert")
            .expect("Alert channel closed")
    }

    /// Gives detached tasks time to run, then asserts nothing was sent.
    pub async fn assert_no_alert(&mut self) {
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(matches!(self.alerts.try_recv(), Err(TryRecvError::Empty)));
    }
}

pub fn build_state(
    bookmarks: BookmarkStore,
    messages: MessageStore,
    notifier: LoginNotifier,
) -> AppState {
    let users = UserDirectory::from_credentials(
        &[UserCredentials {
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        }],
        TEST_ITERATIONS,
    )
    .expect("Failed to build user directory");

    AppState {
        users: Arc::new(users),
        tokens: Arc::new(TokenSigner::new(SECRET, 3600).expect("Failed to build signer")),
        bookmarks: Arc::new(bookmarks),
        messages: Arc::new(messages),
        notifier: Arc::new(notifier),
    }
}

/// Serves `state` on a random loopback port and returns its base URL.
pub async fn serve_state(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(serve(listener, state, std::future::pending()));
    format!("http://{addr}")
}

/// Serves the given stores with one user and a channel transport.
pub async fn spawn_app_with_stores(bookmarks: BookmarkStore, messages: MessageStore) -> TestApp {
    let (tx, alerts) = mpsc::unbounded_channel();
    let notifier = LoginNotifier::new(
        GeoResolver::new(Vec::new()),
        Arc::new(ChannelTransport { tx }),
    );
    TestApp {
        base_url: serve_state(build_state(bookmarks, messages, notifier)).await,
        client: reqwest::Client::new(),
        alerts,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_stores(BookmarkStore::in_memory(), MessageStore::in_memory()).await
}
