//! HTTP adapter tests against a mock backend.

mod common;

use assert_matches::assert_matches;
use eventboard::client::{AdapterError, AuthProvider, Backend, Collection, HttpBackend};
use eventboard::shared::document::to_fields;
use eventboard::shared::profile::AuthUser;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_body(token: &str) -> serde_json::Value {
    json!({
        "token": token,
        "user": { "id": "u1", "email": "ann@example.com" }
    })
}

fn error_body(code: &str, status: u16) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": format!("failed with {}", code),
        "code": code,
        "status": status,
    }))
}

async fn signed_in(server: &MockServer) -> HttpBackend {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-1")))
        .mount(server)
        .await;

    let backend = HttpBackend::new(server.uri());
    backend
        .auth()
        .sign_in("ann@example.com", common::PASSWORD)
        .await
        .unwrap();
    backend
}

#[tokio::test]
async fn test_sign_in_sends_credentials_and_publishes_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ann@example.com", "password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("tok-1")))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let changes = backend.auth().subscribe();

    let user = backend
        .auth()
        .sign_in(" ann@example.com ", "secret123")
        .await
        .unwrap();

    let expected = AuthUser {
        uid: "u1".to_string(),
        email: "ann@example.com".to_string(),
    };
    assert_eq!(user, expected);
    assert_eq!(backend.auth().current_user(), Some(expected.clone()));
    assert_eq!(*changes.borrow(), Some(expected));
}

#[tokio::test]
async fn test_requests_carry_the_session_token() {
    let server = MockServer::start().await;
    let backend = signed_in(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/collections/users/u1"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "data": { "name": "Ann", "description": "", "email": "ann@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let doc = backend.users().get_by_id("u1").await.unwrap().unwrap();
    assert_eq!(doc.id, "u1");
    assert_eq!(doc.data["name"], json!("Ann"));
}

#[tokio::test]
async fn test_sign_out_forgets_the_token() {
    let server = MockServer::start().await;
    let backend = signed_in(&server).await;
    backend.auth().sign_out().await.unwrap();

    assert_eq!(backend.auth().current_user(), None);
    assert_matches!(
        backend.auth().update_password("new-secret").await,
        Err(AdapterError::Unauthenticated)
    );
}

#[tokio::test]
async fn test_collection_reads_and_writes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "e1", "data": { "name": "Art Walk" } },
            { "id": "e2", "data": { "name": "Jazz Night" } }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/collections/events"))
        .and(body_json(json!({ "name": "Meetup" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "e3" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/collections/events/e1"))
        .and(body_json(json!({ "name": "Art Walk II" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/collections/events/e2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(format!("{}/", server.uri()));
    let events = backend.events();

    let docs = events.get().await.unwrap();
    let ids: Vec<&str> = docs.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);

    let id = events
        .add(to_fields(&json!({ "name": "Meetup" })).unwrap())
        .await
        .unwrap();
    assert_eq!(id, "e3");

    events
        .update("e1", to_fields(&json!({ "name": "Art Walk II" })).unwrap())
        .await
        .unwrap();
    events.delete("e2").await.unwrap();
}

#[tokio::test]
async fn test_missing_document_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/events/nope"))
        .respond_with(error_body("not-found", 404))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_eq!(backend.events().get_by_id("nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_error_codes_map_to_adapter_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(error_body("auth/wrong-password", 401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(error_body("auth/email-already-in-use", 409))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/collections/events/e1"))
        .respond_with(error_body("permission-denied", 403))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/collections/events/e1"))
        .respond_with(error_body("not-found", 404))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_eq!(
        backend.auth().sign_in("ann@example.com", "bad").await,
        Err(AdapterError::WrongPassword)
    );
    assert_eq!(
        backend.auth().sign_up("ann@example.com", "secret123").await,
        Err(AdapterError::EmailInUse)
    );
    assert_matches!(
        backend.events().set("e1", Default::default()).await,
        Err(AdapterError::PermissionDenied(_))
    );
    assert_matches!(
        backend.events().update("e1", Default::default()).await,
        Err(AdapterError::NotFound(_))
    );
    assert_eq!(backend.auth().current_user(), None);
}

#[tokio::test]
async fn test_errors_without_body_fall_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/collections/users"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/collections/events"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert_matches!(backend.users().get().await, Err(AdapterError::PermissionDenied(_)));
    assert_matches!(
        backend.events().get().await,
        Err(AdapterError::Other { code, .. }) if code == "503"
    );
}

#[tokio::test]
async fn test_email_change_replaces_token() {
    let server = MockServer::start().await;
    let backend = signed_in(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/auth/email"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-2",
            "user": { "id": "u1", "email": "ann.lee@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/auth/account"))
        .and(header("authorization", "Bearer tok-2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    backend.auth().update_email("ann.lee@example.com").await.unwrap();
    assert_eq!(
        backend.auth().current_user().map(|user| user.email),
        Some("ann.lee@example.com".to_string())
    );

    backend.auth().delete_user().await.unwrap();
    assert_eq!(backend.auth().current_user(), None);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let backend = HttpBackend::new("http://127.0.0.1:9");
    assert_matches!(backend.events().get().await, Err(AdapterError::Network(_)));
}
