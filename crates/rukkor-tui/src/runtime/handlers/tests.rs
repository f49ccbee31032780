use rukkor_core::api::AuthClient;
use rukkor_core::session::SessionStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::auth;
use crate::events::{AuthUiEvent, UiEvent};

fn client_for(server: &MockServer, dir: &tempfile::TempDir) -> AuthClient {
    let session = SessionStore::at(dir.path().join("session.json"));
    AuthClient::new(server.uri(), session)
}

#[tokio::test]
async fn login_handler_persists_the_token_before_reporting_success() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "user": { "id": "1", "email": "user@test.com", "name": "User" },
            "token": "abc"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let event = auth::login(
        client.clone(),
        "user@test.com".to_string(),
        "secret123".to_string(),
    )
    .await;

    match event {
        UiEvent::Auth(AuthUiEvent::LoginFinished(Ok((user, token)))) => {
            assert_eq!(user.id, "1");
            assert_eq!(token, "abc");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    // The token store already holds the credential
    assert_eq!(
        client.session().load_token().unwrap().as_deref(),
        Some("abc")
    );
}

#[tokio::test]
async fn login_handler_reports_the_failure_message_and_writes_nothing() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let event = auth::login(
        client.clone(),
        "user@test.com".to_string(),
        "wrong".to_string(),
    )
    .await;

    assert!(matches!(
        event,
        UiEvent::Auth(AuthUiEvent::LoginFinished(Err(msg))) if msg == "Invalid credentials"
    ));
    assert_eq!(client.session().load_token().unwrap(), None);
}

#[tokio::test]
async fn otp_handler_persists_the_returned_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/verify-otp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "token": "otp-token"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let event = auth::verify_otp(
        client.clone(),
        "123456".to_string(),
        "user@test.com".to_string(),
    )
    .await;

    assert!(matches!(
        event,
        UiEvent::Auth(AuthUiEvent::OtpFinished(Ok(token))) if token == "otp-token"
    ));
    assert_eq!(
        client.session().load_token().unwrap().as_deref(),
        Some("otp-token")
    );
}

#[tokio::test]
async fn signup_handler_does_not_touch_the_session_store() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "user": { "id": "2", "email": "new@test.com", "name": "New User" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, &dir);
    let event = auth::signup(client.clone(), rukkor_core::api::RegisterFields::default()).await;

    assert!(matches!(
        event,
        UiEvent::Auth(AuthUiEvent::SignupFinished(Ok(user))) if user.email == "new@test.com"
    ));
    assert_eq!(client.session().load_token().unwrap(), None);
}
