//! Backend service helpers

use axum::Router;
use axum_test::TestServer;
use eventboard::backend::server::config::load_database;
use eventboard::backend::server::{create_app_with_pool, ServerConfig};
use serde_json::{json, Value};

pub const MEMORY_DB: &str = "sqlite::memory:";

/// Application over a private in-memory database
pub async fn test_app() -> Router {
    let pool = load_database(MEMORY_DB).await.expect("in-memory database");
    create_app_with_pool(pool, ServerConfig::with_database_url(MEMORY_DB))
}

pub async fn test_server() -> TestServer {
    TestServer::new(test_app().await).unwrap()
}

/// Account created through the API
pub struct TestAccount {
    pub id: String,
    pub email: String,
    pub token: String,
}

pub async fn create_account(server: &TestServer, email: &str) -> TestAccount {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "email": email, "password": super::PASSWORD }))
        .await;
    assert_eq!(response.status_code(), axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    TestAccount {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        email: body["user"]["email"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}

/// JSON body of an event organised by `organisation`
pub fn event_body(name: &str, organisation: &str) -> Value {
    let mut body = serde_json::to_value(super::draft(name, "", "", &[])).unwrap();
    body["organisation"] = json!(organisation);
    body
}
