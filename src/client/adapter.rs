/**
 * Backend Client Adapter
 *
 * The store never talks to a database or auth server directly. It goes
 * through a `Backend`, which exposes two document collections (`events`,
 * `users`) and an auth handle. Adapters are pass-through: no retries, no
 * timeouts, no caching. Failures come back as `AdapterError`.
 *
 * # Implementations
 *
 * - `HttpBackend` - the reference backend service over HTTP
 * - `MemoryBackend` - in-process collections and accounts
 */

use std::future::Future;

use thiserror::Error;
use tokio::sync::watch;

use crate::shared::document::{Document, Fields};
use crate::shared::error::{codes, SharedError};
use crate::shared::profile::{AuthUser, MIN_PASSWORD_LEN};

pub type AdapterResult<T> = Result<T, AdapterError>;

/// Failures reported by a backend adapter
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdapterError {
    #[error("Wrong password.")]
    WrongPassword,

    #[error("There is no user record corresponding to this email.")]
    UserNotFound,

    #[error("The email address is already in use by another account.")]
    EmailInUse,

    #[error("The email address is badly formatted.")]
    InvalidEmail,

    #[error("Password should be at least {min} characters.")]
    WeakPassword { min: usize },

    #[error("No user is signed in.")]
    Unauthenticated,

    #[error("Missing or insufficient permissions: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed document: {0}")]
    Decode(String),

    #[error("Backend error ({code}): {message}")]
    Other { code: String, message: String },
}

impl AdapterError {
    /// Provider-style error code
    pub fn code(&self) -> &str {
        match self {
            Self::WrongPassword => codes::WRONG_PASSWORD,
            Self::UserNotFound => codes::USER_NOT_FOUND,
            Self::EmailInUse => codes::EMAIL_IN_USE,
            Self::InvalidEmail => codes::INVALID_EMAIL,
            Self::WeakPassword { .. } => codes::WEAK_PASSWORD,
            Self::Unauthenticated => codes::UNAUTHENTICATED,
            Self::PermissionDenied(_) => codes::PERMISSION_DENIED,
            Self::NotFound(_) => codes::NOT_FOUND,
            Self::Network(_) => "unavailable",
            Self::Decode(_) => "data-loss",
            Self::Other { code, .. } => code,
        }
    }

    /// Rebuild a typed error from a code and message sent by the backend
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            codes::WRONG_PASSWORD => Self::WrongPassword,
            codes::USER_NOT_FOUND => Self::UserNotFound,
            codes::EMAIL_IN_USE => Self::EmailInUse,
            codes::INVALID_EMAIL => Self::InvalidEmail,
            codes::WEAK_PASSWORD => Self::WeakPassword {
                min: MIN_PASSWORD_LEN,
            },
            codes::UNAUTHENTICATED => Self::Unauthenticated,
            codes::PERMISSION_DENIED => Self::PermissionDenied(message),
            codes::NOT_FOUND => Self::NotFound(message),
            _ => Self::Other {
                code: code.to_string(),
                message,
            },
        }
    }
}

impl From<SharedError> for AdapterError {
    fn from(err: SharedError) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A named collection of JSON documents
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Store a new document under a backend-assigned id
    fn add(&self, data: Fields) -> impl Future<Output = AdapterResult<String>> + Send;

    /// Every document in the collection, in insertion order
    fn get(&self) -> impl Future<Output = AdapterResult<Vec<Document>>> + Send;

    fn get_by_id(&self, id: &str) -> impl Future<Output = AdapterResult<Option<Document>>> + Send;

    /// Create or overwrite the document at `id`
    fn set(&self, id: &str, data: Fields) -> impl Future<Output = AdapterResult<()>> + Send;

    /// Merge top-level fields into an existing document
    fn update(&self, id: &str, fields: Fields) -> impl Future<Output = AdapterResult<()>> + Send;

    /// Remove a document; removing a missing document succeeds
    fn delete(&self, id: &str) -> impl Future<Output = AdapterResult<()>> + Send;
}

/// Email/password authentication
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = AdapterResult<AuthUser>> + Send;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = AdapterResult<AuthUser>> + Send;

    fn sign_out(&self) -> impl Future<Output = AdapterResult<()>> + Send;

    fn current_user(&self) -> Option<AuthUser>;

    fn update_email(&self, email: &str) -> impl Future<Output = AdapterResult<()>> + Send;

    fn update_password(&self, password: &str) -> impl Future<Output = AdapterResult<()>> + Send;

    /// Delete the signed-in account and sign out
    fn delete_user(&self) -> impl Future<Output = AdapterResult<()>> + Send;

    /// Auth state stream: holds the current user and changes on every sign-in/out
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// A document database plus auth provider
pub trait Backend: Send + Sync + 'static {
    type Collection: Collection;
    type Auth: AuthProvider;

    fn events(&self) -> &Self::Collection;
    fn users(&self) -> &Self::Collection;
    fn auth(&self) -> &Self::Auth;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        let errors = [
            AdapterError::WrongPassword,
            AdapterError::UserNotFound,
            AdapterError::EmailInUse,
            AdapterError::InvalidEmail,
            AdapterError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            },
            AdapterError::Unauthenticated,
        ];
        for err in errors {
            assert_eq!(AdapterError::from_code(err.code(), err.to_string()), err);
        }
    }

    #[test]
    fn test_unknown_code_is_kept() {
        let err = AdapterError::from_code("resource-exhausted", "quota");
        assert_eq!(err.code(), "resource-exhausted");
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_wrong_password_message() {
        assert_eq!(AdapterError::WrongPassword.to_string(), "Wrong password.");
    }
}
