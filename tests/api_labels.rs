use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gmctl::api::client::GmailClient;
use gmctl::auth::FileTokenStore;
use gmctl::cli::{LabelAction, LabelsArgs};
use gmctl::commands::labels::{self, mutate_batch};
use gmctl::config::{AppPaths, Settings};
use gmctl::context::AppContext;

const TOKEN: &str = "test-token";

async fn mount_label_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/gmail/v1/users/me/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": [
                {"id": "INBOX", "name": "INBOX", "type": "system"},
                {"id": "Label_7", "name": "Important", "type": "user"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn creating_a_system_label_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = GmailClient::with_base_url(server.uri());

    for name in ["INBOX", "inbox", "CATEGORY_SOCIAL"] {
        let err = client
            .create_label(name, TOKEN)
            .await
            .expect_err("system name should be rejected");
        assert_eq!(err.error_type(), "ValidationError", "{name}");
    }

    let received = server.received_requests().await.expect("recording on");
    assert!(received.is_empty(), "no request may be issued");
}

#[tokio::test]
async fn create_returns_the_new_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/labels"))
        .and(body_string_contains("Urgent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "Label_9",
            "name": "Urgent",
            "type": "user"
        })))
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let label = client.create_label("Urgent", TOKEN).await.expect("create");

    assert_eq!(label.id, "Label_9");
    assert_eq!(label.name, "Urgent");
    assert_eq!(label.kind, "user");
}

#[tokio::test]
async fn duplicate_label_maps_conflict_to_label_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/labels"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"message": "Label name exists or conflicts"}
        })))
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let err = client
        .create_label("Urgent", TOKEN)
        .await
        .expect_err("409 should fail");

    assert_eq!(err.error_type(), "LabelError");
    assert!(err.to_string().contains("already exists"));
}

#[tokio::test]
async fn unknown_label_name_fails_resolution() {
    let server = MockServer::start().await;
    mount_label_list(&server).await;

    let client = GmailClient::with_base_url(server.uri());
    let err = mutate_batch(
        &client,
        TOKEN,
        LabelAction::Apply,
        "NoSuchLabel",
        &["m1".to_string()],
    )
    .await
    .expect_err("unknown label should fail");

    assert_eq!(err.error_type(), "LabelError");
    assert!(err.to_string().contains("label not found"));
}

#[tokio::test]
async fn apply_resolves_name_and_modifies_each_message() {
    let server = MockServer::start().await;
    mount_label_list(&server).await;
    for id in ["m1", "m2"] {
        Mock::given(method("POST"))
            .and(path(format!("/gmail/v1/users/me/messages/{id}/modify")))
            .and(body_string_contains("Label_7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = GmailClient::with_base_url(server.uri());
    let view = mutate_batch(
        &client,
        TOKEN,
        LabelAction::Apply,
        "Important",
        &["m1".to_string(), "m2".to_string()],
    )
    .await
    .expect("apply should succeed");

    assert_eq!(view.action, "apply");
    assert_eq!(view.label_id, "Label_7");
    assert_eq!(view.applied_count, 2);
    assert_eq!(view.failed_count, 0);
    assert!(view.outcomes.iter().all(|outcome| outcome.status == "ok"));
}

#[tokio::test]
async fn reapplying_a_label_is_idempotent() {
    let server = MockServer::start().await;
    mount_label_list(&server).await;
    // The provider treats re-adding a present label as a successful no-op.
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/m1/modify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    for _ in 0..2 {
        let view = mutate_batch(
            &client,
            TOKEN,
            LabelAction::Apply,
            "Important",
            &["m1".to_string()],
        )
        .await
        .expect("apply should succeed");
        assert_eq!(view.applied_count, 1);
    }
}

#[tokio::test]
async fn partial_failure_reports_per_message_outcomes() {
    let server = MockServer::start().await;
    mount_label_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/m1/modify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/m2/modify"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Requested entity was not found."}
        })))
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let view = mutate_batch(
        &client,
        TOKEN,
        LabelAction::Remove,
        "Important",
        &["m1".to_string(), "m2".to_string()],
    )
    .await
    .expect("partial failure is still a reportable result");

    assert_eq!(view.action, "remove");
    assert_eq!(view.applied_count, 1);
    assert_eq!(view.failed_count, 1);
    assert_eq!(view.outcomes[0].status, "ok");
    assert_eq!(view.outcomes[1].status, "error");
    assert!(
        view.outcomes[1]
            .message
            .as_deref()
            .expect("failure message")
            .contains("was not found")
    );
}

#[tokio::test]
async fn fully_failed_batch_becomes_a_label_error() {
    let server = MockServer::start().await;
    mount_label_list(&server).await;
    Mock::given(method("POST"))
        .and(path("/gmail/v1/users/me/messages/m1/modify"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Requested entity was not found."}
        })))
        .mount(&server)
        .await;

    let client = GmailClient::with_base_url(server.uri());
    let err = mutate_batch(
        &client,
        TOKEN,
        LabelAction::Apply,
        "Important",
        &["m1".to_string()],
    )
    .await
    .expect_err("all-failed batch should error");

    assert_eq!(err.error_type(), "LabelError");
}

#[tokio::test]
async fn creating_a_system_label_fails_before_any_token_is_loaded() {
    let server = MockServer::start().await;

    // Paths point at a directory with no stored token. Were the token
    // consulted first, this would surface as MissingCredentials instead.
    let scratch = std::env::temp_dir().join(format!("gmctl-test-{}", std::process::id()));
    let paths = AppPaths::from_dirs(scratch.clone(), scratch);
    let ctx = AppContext {
        verbose: false,
        settings: Settings::default(),
        token_store: FileTokenStore::new(paths.clone()),
        paths,
        client: GmailClient::with_base_url(server.uri()),
    };

    let err = labels::run(
        &ctx,
        LabelsArgs {
            action: LabelAction::Create,
            name: Some("INBOX".to_string()),
            label_name: None,
            message_ids: Vec::new(),
        },
    )
    .await
    .expect_err("system name should be rejected");

    assert_eq!(err.error_type(), "ValidationError");
    let received = server.received_requests().await.expect("recording on");
    assert!(received.is_empty(), "no request may be issued");
}
