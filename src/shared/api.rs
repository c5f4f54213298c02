//! HTTP API Wire Types
//!
//! Request and response bodies exchanged between the HTTP adapter and the
//! backend service.

use serde::{Deserialize, Serialize};

use crate::shared::profile::AuthUser;

/// Sign-up and login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailChangeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChangeRequest {
    pub password: String,
}

/// Account as returned by the auth endpoints (no secrets)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
}

impl From<AccountResponse> for AuthUser {
    fn from(account: AccountResponse) -> Self {
        AuthUser {
            uid: account.id,
            email: account.email,
        }
    }
}

/// Returned by signup, login and email change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub user: AccountResponse,
}

/// Returned when a document is added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Error body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub code: String,
    pub status: u16,
}
