/**
 * Backend Error Types
 *
 * Every handler returns `Result<_, BackendError>`. Request-level failures
 * (bad credentials, missing permissions, unknown documents) are `Api`
 * errors carrying an HTTP status and a provider-style code; infrastructure
 * failures wrap the underlying library error and surface as `internal`.
 *
 * # Error Codes
 *
 * | Code | Status |
 * |------|--------|
 * | `auth/wrong-password` | 401 |
 * | `auth/user-not-found` | 404 |
 * | `auth/email-already-in-use` | 409 |
 * | `auth/invalid-email`, `auth/weak-password`, `invalid-argument` | 400 |
 * | `auth/unauthenticated` | 401 |
 * | `permission-denied` | 403 |
 * | `not-found` | 404 |
 * | `internal` | 500 |
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::codes;
use crate::shared::profile::MIN_PASSWORD_LEN;
use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// A request the caller can fix
    #[error("{message}")]
    Api {
        status: StatusCode,
        code: &'static str,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Shared(#[from] SharedError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl BackendError {
    pub fn api(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn wrong_password() -> Self {
        Self::api(StatusCode::UNAUTHORIZED, codes::WRONG_PASSWORD, "Wrong password.")
    }

    pub fn user_not_found() -> Self {
        Self::api(
            StatusCode::NOT_FOUND,
            codes::USER_NOT_FOUND,
            "There is no user record corresponding to this email.",
        )
    }

    pub fn email_in_use() -> Self {
        Self::api(
            StatusCode::CONFLICT,
            codes::EMAIL_IN_USE,
            "The email address is already in use by another account.",
        )
    }

    pub fn invalid_email() -> Self {
        Self::api(
            StatusCode::BAD_REQUEST,
            codes::INVALID_EMAIL,
            "The email address is badly formatted.",
        )
    }

    pub fn weak_password() -> Self {
        Self::api(
            StatusCode::BAD_REQUEST,
            codes::WEAK_PASSWORD,
            format!("Password should be at least {} characters.", MIN_PASSWORD_LEN),
        )
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::api(StatusCode::UNAUTHORIZED, codes::UNAUTHENTICATED, message)
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::api(StatusCode::FORBIDDEN, codes::PERMISSION_DENIED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::api(StatusCode::NOT_FOUND, codes::NOT_FOUND, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::api(StatusCode::BAD_REQUEST, codes::INVALID_ARGUMENT, message)
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Api { status, .. } => *status,
            Self::Shared(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Provider-style error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api { code, .. } => *code,
            Self::Shared(SharedError::ValidationError { .. }) => codes::INVALID_ARGUMENT,
            _ => codes::INTERNAL,
        }
    }

    /// Message shown to the client. Infrastructure details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Shared(err @ SharedError::ValidationError { .. }) => err.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error() {
        let error = BackendError::permission_denied("not yours");
        match &error {
            BackendError::Api { status, code, message } => {
                assert_eq!(*status, StatusCode::FORBIDDEN);
                assert_eq!(*code, codes::PERMISSION_DENIED);
                assert_eq!(message, "not yours");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::wrong_password().status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::email_in_use().status_code(), StatusCode::CONFLICT);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::from(SharedError::validation("name", "empty")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::from(SharedError::serialization("bad")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let error = BackendError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.code(), codes::INTERNAL);
        assert_eq!(error.message(), "Internal server error");
    }
}
