use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gmctl::api::client::GmailClient;
use gmctl::api::models::SendRequest;
use gmctl::mail::mime;

const TOKEN: &str = "test-token";

fn raw_message() -> String {
    mime::build_raw_message(&SendRequest {
        to: vec!["dev@example.com".to_string()],
        cc: vec![],
        bcc: vec![],
        subject: "Hello".to_string(),
        body: "Hi there".to_string(),
        attachments: vec![],
    })
}

#[tokio::test]
async fn send_posts_raw_message_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/send"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m9",
            "threadId": "m9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let response = client.send(&raw_message(), TOKEN).await.expect("send");

    assert_eq!(response.id, "m9");
    // A fresh message threads under its own id.
    assert_eq!(response.thread_id.as_deref(), Some("m9"));
}

#[tokio::test]
async fn rejected_send_passes_provider_message_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/send"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Recipient address required"}
        })))
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let err = client
        .send(&raw_message(), TOKEN)
        .await
        .expect_err("rejected send should fail");

    assert_eq!(err.error_type(), "SendError");
    assert!(err.to_string().contains("Recipient address required"));
}

#[test]
fn raw_message_is_valid_base64url() {
    let raw = raw_message();
    let decoded = URL_SAFE_NO_PAD.decode(&raw).expect("base64url payload");
    let text = String::from_utf8(decoded).expect("utf8 payload");
    assert!(text.starts_with("To: dev@example.com"));
}
