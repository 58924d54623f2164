use mansite::config::Config;
use mansite::gateway::run_gateway_with_listener;
use mansite::store::{MessageStatus, MessageStore, SqliteMessageStore};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct GatewayTestServer {
    port: u16,
    database_url: String,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    _workspace: TempDir,
}

impl GatewayTestServer {
    #[allow(clippy::field_reassign_with_default)]
    async fn start(telnyx_base_url: &str) -> Self {
        let workspace = TempDir::new().expect("temp workspace should be created");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let mut config = Config::default();
        config.data_dir = workspace.path().to_path_buf();
        config.config_path = workspace.path().join("config.toml");
        config.provider.telnyx.api_key = Some("KEY0integration".to_string());
        config.provider.telnyx.from_number = Some("+15550001111".to_string());
        config.provider.telnyx.api_base_url = telnyx_base_url.to_string();
        let database_url = config.database_url();

        let host = "127.0.0.1".to_string();
        let config = Arc::new(config);
        let handle =
            tokio::spawn(async move { run_gateway_with_listener(&host, listener, config).await });

        wait_until_gateway_ready(port).await;

        Self {
            port,
            database_url,
            handle,
            _workspace: workspace,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    async fn store(&self) -> SqliteMessageStore {
        SqliteMessageStore::connect(&self.database_url)
            .await
            .expect("message log should open")
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}

async fn mount_queued(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v2/messages"))
        .and(header("authorization", "Bearer KEY0integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "telnyx-msg-1", "to": [{"status": "queued"}]}
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn form_submission_is_sent_and_logged() {
    let telnyx = MockServer::start().await;
    mount_queued(&telnyx, 1).await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/send-message"))
        .header("client-ip", "198.51.100.7")
        .json(&json!({"phoneNumber": "+15552223333", "message": "Hello, how are you?"}))
        .send()
        .await
        .expect("send request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("response should be json");
    assert_eq!(body["success"], true);
    assert_eq!(body["messageId"], "telnyx-msg-1");

    let record_id = body["recordId"].as_str().expect("record id should be set");
    let record = server
        .store()
        .await
        .get(record_id)
        .await
        .expect("lookup should succeed")
        .expect("record should exist");
    assert_eq!(record.status, MessageStatus::Queued);
    assert_eq!(record.provider, "telnyx");
    assert_eq!(record.ip_address, "198.51.100.7");
    assert_eq!(record.provider_message_id.as_deref(), Some("telnyx-msg-1"));

    telnyx.verify().await;
}

#[tokio::test]
async fn multi_segment_message_makes_one_call_per_segment() {
    let telnyx = MockServer::start().await;
    mount_queued(&telnyx, 2).await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;

    let message = "word ".repeat(40);
    let response = reqwest::Client::new()
        .post(server.url("/api/send-message"))
        .json(&json!({"phoneNumber": "+15552223333", "message": message}))
        .send()
        .await
        .expect("send request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("response should be json");
    assert_eq!(body["segments"], 2);

    let received = telnyx
        .received_requests()
        .await
        .expect("mock server should record requests");
    let texts: Vec<String> = received
        .iter()
        .map(|r| {
            let json: Value = serde_json::from_slice(&r.body).expect("provider body is json");
            json["text"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    assert_eq!(texts, mansite::segments::split(message.trim()));
}

#[tokio::test]
async fn rejected_message_never_reaches_provider() {
    let telnyx = MockServer::start().await;
    mount_queued(&telnyx, 0).await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/send-message"))
        .json(&json!({"phoneNumber": "+15552223333", "message": "grab it at bit.ly/deal"}))
        .send()
        .await
        .expect("send request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("response should be json");
    assert_eq!(body["reason"], "hyperlink_detected");

    let logged = server
        .store()
        .await
        .list_recent(10)
        .await
        .expect("listing should succeed");
    assert!(logged.is_empty());
    telnyx.verify().await;
}

#[tokio::test]
async fn provider_rejection_is_reported_and_logged_as_failed() {
    let telnyx = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/messages"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"errors":[{"code":"40310"}]}"#),
        )
        .mount(&telnyx)
        .await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/send-message"))
        .json(&json!({"phoneNumber": "+15552223333", "message": "Hello there"}))
        .send()
        .await
        .expect("send request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("response should be json");
    assert_eq!(body["error"], "Failed to send message");
    assert!(body["details"].as_str().is_some_and(|d| d.contains("422")));

    let logged = server
        .store()
        .await
        .list_recent(1)
        .await
        .expect("listing should succeed");
    assert_eq!(logged[0].status, MessageStatus::Failed);
}

#[tokio::test]
async fn validate_endpoint_matches_send_rules() {
    let telnyx = MockServer::start().await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;
    let client = reqwest::Client::new();

    for (message, reason) in [
        ("Hello, how are you?", Value::Null),
        ("see www.example.com", json!("hyperlink_detected")),
        ("ring (555) 123-4567 tonight", json!("phone_number_detected")),
    ] {
        let body: Value = client
            .post(server.url("/api/validate"))
            .json(&json!({ "message": message }))
            .send()
            .await
            .expect("validate request should complete")
            .json()
            .await
            .expect("response should be json");
        assert_eq!(body["reason"], reason, "{message}");
    }
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let telnyx = MockServer::start().await;
    let server = GatewayTestServer::start(&telnyx.uri()).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, server.url("/api/send-message"))
        .header("origin", "https://forms.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("preflight should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
