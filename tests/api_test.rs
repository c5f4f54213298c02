//! Backend service API tests
//!
//! Authentication endpoints and the collection access rules.

#![cfg(feature = "ssr")]

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[tokio::test]
async fn test_signup_and_me() {
    let server = test_server().await;
    let account = create_account(&server, "ann@example.com").await;
    assert_eq!(account.email, "ann@example.com");

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&account.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({ "id": account.id, "email": "ann@example.com" }));
}

#[tokio::test]
async fn test_me_requires_token() {
    let server = test_server().await;

    let response = server.get("/api/auth/me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("auth/unauthenticated"));

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not-a-token")
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_errors() {
    let server = test_server().await;
    create_account(&server, "ann@example.com").await;

    let cases = [
        (json!({ "email": "ANN@example.com", "password": PASSWORD }), StatusCode::CONFLICT, "auth/email-already-in-use"),
        (json!({ "email": "not-an-email", "password": PASSWORD }), StatusCode::BAD_REQUEST, "auth/invalid-email"),
        (json!({ "email": "bea@example.com", "password": "123" }), StatusCode::BAD_REQUEST, "auth/weak-password"),
    ];
    for (request, status, code) in cases {
        let response = server.post("/api/auth/signup").json(&request).await;
        assert_eq!(response.status_code(), status);
        let body: Value = response.json();
        assert_eq!(body["code"], json!(code));
        assert_eq!(body["status"], json!(status.as_u16()));
    }
}

#[tokio::test]
async fn test_login() {
    let server = test_server().await;
    let account = create_account(&server, "ann@example.com").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], json!(account.id));
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": "wrong-password" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("auth/wrong-password"));

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("auth/user-not-found"));
}

#[tokio::test]
async fn test_events_are_public_and_ordered() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;

    let mut ids = Vec::new();
    for name in ["Art Walk", "Jazz Night"] {
        let response = server
            .post("/api/collections/events")
            .authorization_bearer(&ann.token)
            .json(&event_body(name, &ann.id))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = server.get("/api/collections/events").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let docs: Vec<Value> = response.json();
    let listed: Vec<&str> = docs.iter().map(|doc| doc["id"].as_str().unwrap()).collect();
    assert_eq!(listed, ids.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(docs[0]["data"]["name"], json!("Art Walk"));

    let response = server.get(&format!("/api/collections/events/{}", ids[1])).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_creating_events_needs_matching_organiser() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;

    let response = server
        .post("/api/collections/events")
        .json(&event_body("Art Walk", &ann.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/collections/events")
        .authorization_bearer(&ann.token)
        .json(&event_body("Art Walk", "someone-else"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("permission-denied"));
}

#[tokio::test]
async fn test_only_organiser_changes_events() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;
    let bea = create_account(&server, "bea@example.com").await;

    let response = server
        .post("/api/collections/events")
        .authorization_bearer(&ann.token)
        .json(&event_body("Art Walk", &ann.id))
        .await;
    let body: Value = response.json();
    let doc_path = format!("/api/collections/events/{}", body["id"].as_str().unwrap());

    let response = server
        .put(&doc_path)
        .authorization_bearer(&bea.token)
        .json(&event_body("Hijacked", &bea.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .patch(&doc_path)
        .authorization_bearer(&bea.token)
        .json(&json!({ "name": "Hijacked" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server.delete(&doc_path).authorization_bearer(&bea.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let stored: Value = server.get(&doc_path).await.json();
    assert_eq!(stored["data"]["name"], json!("Art Walk"));
}

#[tokio::test]
async fn test_organiser_cannot_be_reassigned() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;
    let bea = create_account(&server, "bea@example.com").await;

    let response = server
        .post("/api/collections/events")
        .authorization_bearer(&ann.token)
        .json(&event_body("Art Walk", &ann.id))
        .await;
    let body: Value = response.json();
    let doc_path = format!("/api/collections/events/{}", body["id"].as_str().unwrap());

    let response = server
        .put(&doc_path)
        .authorization_bearer(&ann.token)
        .json(&event_body("Art Walk II", &bea.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .patch(&doc_path)
        .authorization_bearer(&ann.token)
        .json(&json!({ "organisation": bea.id, "location": "Docks" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let stored: Value = server.get(&doc_path).await.json();
    assert_eq!(stored["data"]["name"], json!("Art Walk II"));
    assert_eq!(stored["data"]["location"], json!("Docks"));
    assert_eq!(stored["data"]["organisation"], json!(ann.id));

    let response = server.delete(&doc_path).authorization_bearer(&ann.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    let response = server.get(&doc_path).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // deleting again is not an error
    let response = server.delete(&doc_path).authorization_bearer(&ann.token).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_profiles_are_private() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;
    let bea = create_account(&server, "bea@example.com").await;
    let profile_path = format!("/api/collections/users/{}", ann.id);
    let profile = json!({ "name": "Ann", "description": "", "email": ann.email });

    let response = server
        .put(&profile_path)
        .authorization_bearer(&ann.token)
        .json(&profile)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&profile_path).authorization_bearer(&ann.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"], profile);

    let response = server.get(&profile_path).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server.get(&profile_path).authorization_bearer(&bea.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .put(&profile_path)
        .authorization_bearer(&bea.token)
        .json(&profile)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .get("/api/collections/users")
        .authorization_bearer(&ann.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_collection() {
    let server = test_server().await;
    let response = server.get("/api/collections/venues").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], json!("not-found"));
}

#[tokio::test]
async fn test_account_changes() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;
    let bea = create_account(&server, "bea@example.com").await;

    let response = server
        .put("/api/auth/email")
        .authorization_bearer(&ann.token)
        .json(&json!({ "email": bea.email }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let response = server
        .put("/api/auth/email")
        .authorization_bearer(&ann.token)
        .json(&json!({ "email": "ann.lee@example.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], json!("ann.lee@example.com"));
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .put("/api/auth/password")
        .authorization_bearer(&token)
        .json(&json!({ "password": "new-secret" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann.lee@example.com", "password": "new-secret" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_account_removes_profile() {
    let server = test_server().await;
    let ann = create_account(&server, "ann@example.com").await;
    let profile_path = format!("/api/collections/users/{}", ann.id);
    server
        .put(&profile_path)
        .authorization_bearer(&ann.token)
        .json(&json!({ "name": "Ann", "description": "", "email": ann.email }))
        .await;

    let response = server
        .delete("/api/auth/account")
        .authorization_bearer(&ann.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    // the token no longer names an account
    let response = server.get("/api/auth/me").authorization_bearer(&ann.token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ann@example.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server().await;
    let response = server.get("/api/nothing-here").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], json!(404));
}
