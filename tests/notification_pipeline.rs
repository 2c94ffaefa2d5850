//! Login alert pipeline against mocked geolocation and mail providers.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use linkstash::config::Config;
use linkstash::geoip::{GeoResolver, GeoResult};
use linkstash::notify::{LoginEvent, LoginNotifier, ResendTransport};
use linkstash::{AppState, StorageBackend};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event(forwarded_for: &str) -> LoginEvent {
    LoginEvent {
        username: "alice".to_string(),
        timestamp: "2024-05-01 09:30:00 +00:00".to_string(),
        forwarded_for: forwarded_for.to_string(),
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build client")
}

async fn ipwhois_success(server: &MockServer, ip: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{ip}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "city": "Berlin",
            "region": "Berlin",
            "country": "Germany",
            "connection": { "isp": "Example Carrier" }
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Polls until `server` has seen at least one request, then returns its JSON body.
async fn first_json_body(server: &MockServer) -> Value {
    for _ in 0..50 {
        if let Some(requests) = server.received_requests().await {
            if let Some(request) = requests.first() {
                return serde_json::from_slice(&request.body).expect("json body");
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("No request reached the mock server");
}

#[tokio::test]
async fn test_primary_failure_falls_back_to_backup() {
    let ipapi = MockServer::start().await;
    let ipwhois = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/203.0.113.5/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .expect(1)
        .mount(&ipapi)
        .await;
    ipwhois_success(&ipwhois, "203.0.113.5").await;

    let resolver = GeoResolver::with_default_providers(client(), &ipapi.uri(), &ipwhois.uri());
    let result = resolver.resolve("203.0.113.5").await;

    assert_eq!(
        result.to_string(),
        "Berlin, Berlin, Germany (ISP: Example Carrier)"
    );
}

#[tokio::test]
async fn test_primary_success_skips_backup() {
    let ipapi = MockServer::start().await;
    let ipwhois = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/203.0.113.5/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Toronto",
            "region": "Ontario",
            "country_name": "Canada",
            "org": "Example Cable"
        })))
        .expect(1)
        .mount(&ipapi)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&ipwhois)
        .await;

    let resolver = GeoResolver::with_default_providers(client(), &ipapi.uri(), &ipwhois.uri());
    assert_eq!(
        resolver.resolve("203.0.113.5").await.to_string(),
        "Toronto, Ontario, Canada (ISP: Example Cable)"
    );
}

#[tokio::test]
async fn test_all_providers_failing_is_unknown() {
    let ipapi = MockServer::start().await;
    let ipwhois = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&ipapi)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Reserved range"
        })))
        .mount(&ipwhois)
        .await;

    let resolver = GeoResolver::with_default_providers(client(), &ipapi.uri(), &ipwhois.uri());
    assert_eq!(resolver.resolve("203.0.113.5").await, GeoResult::Unknown);
}

#[tokio::test]
async fn test_notifier_sends_composed_alert_through_resend() {
    let ipapi = MockServer::start().await;
    let ipwhois = MockServer::start().await;
    let resend = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&ipapi)
        .await;
    ipwhois_success(&ipwhois, "203.0.113.5").await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_test_key"))
        .and(body_partial_json(json!({
            "from": "Login Bot <onboarding@resend.dev>",
            "to": "ops@example.com",
            "subject": "🔐 Login Alert: alice"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_1" })))
        .expect(1)
        .mount(&resend)
        .await;

    let notifier = LoginNotifier::new(
        GeoResolver::with_default_providers(client(), &ipapi.uri(), &ipwhois.uri()),
        Arc::new(ResendTransport::new(
            client(),
            format!("{}/emails", resend.uri()),
            "re_test_key",
            "Login Bot <onboarding@resend.dev>",
            "ops@example.com",
        )),
    );
    notifier.notify(event("10.0.0.1, 203.0.113.5")).await;

    let body = first_json_body(&resend).await;
    assert_eq!(
        body["text"],
        "User \"alice\" logged in at 2024-05-01 09:30:00 +00:00\n\
         IP: 203.0.113.5\n\
         Location: Berlin, Berlin, Germany (ISP: Example Carrier)"
    );
}

#[tokio::test]
async fn test_notifier_survives_resend_rejection() {
    let resend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("domain not verified"))
        .expect(1)
        .mount(&resend)
        .await;

    let notifier = Arc::new(LoginNotifier::new(
        GeoResolver::new(Vec::new()),
        Arc::new(ResendTransport::new(
            client(),
            format!("{}/emails", resend.uri()),
            "re_test_key",
            "from@example.com",
            "to@example.com",
        )),
    ));

    notifier
        .spawn(event("192.168.1.10"))
        .await
        .expect("notification task must not panic");
}

#[tokio::test]
async fn test_login_end_to_end_with_configured_providers() {
    let ipapi = MockServer::start().await;
    let ipwhois = MockServer::start().await;
    let resend = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/198.51.100.20/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Sydney",
            "region": "New South Wales",
            "country_name": "Australia",
            "org": "Example Telecom"
        })))
        .expect(1)
        .mount(&ipapi)
        .await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email_2" })))
        .expect(1)
        .mount(&resend)
        .await;

    let config = Config {
        secret_key: helpers::SECRET.to_string(),
        storage: StorageBackend::Memory,
        pbkdf2_iterations: helpers::TEST_ITERATIONS,
        resend_api_key: Some("re_test_key".to_string()),
        email_to: Some("ops@example.com".to_string()),
        resend_api_url: format!("{}/emails", resend.uri()),
        ipapi_base_url: ipapi.uri(),
        ipwhois_base_url: ipwhois.uri(),
        users: vec![linkstash::config::UserCredentials {
            username: helpers::USERNAME.to_string(),
            password: helpers::PASSWORD.to_string(),
        }],
        ..Default::default()
    };
    let state = AppState::from_config(&config).await.expect("state");
    let base_url = helpers::serve_state(state).await;

    let response = reqwest::Client::new()
        .post(format!("{base_url}/login"))
        .header("X-Forwarded-For", "172.16.0.4, 198.51.100.20, 10.0.0.1")
        .json(&json!({ "username": helpers::USERNAME, "password": helpers::PASSWORD }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);

    let body = first_json_body(&resend).await;
    let text = body["text"].as_str().expect("text");
    assert!(text.contains("\nIP: 198.51.100.20\n"));
    assert!(text.ends_with("Location: Sydney, New South Wales, Australia (ISP: Example Telecom)"));
}
