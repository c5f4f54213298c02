//! Shared Error Types
//!
//! This module defines error types that are shared between the client and the
//! backend service. These errors represent failures that can occur on either
//! side of the wire: bad input at a form boundary or a document that does not
//! decode.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Field validation failures at an input boundary
//!
//! # Error Codes
//!
//! The [`codes`] module lists the provider-style error codes the backend
//! service puts in its JSON error bodies and the HTTP adapter maps back into
//! typed errors.
//!
//! # Usage
//!
//! ```rust
//! use eventboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "Event name cannot be empty");
//! ```
use thiserror::Error;

/// Provider-style error codes carried in backend error bodies.
pub mod codes {
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const EMAIL_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const UNAUTHENTICATED: &str = "auth/unauthenticated";
    pub const PERMISSION_DENIED: &str = "permission-denied";
    pub const NOT_FOUND: &str = "not-found";
    pub const INVALID_ARGUMENT: &str = "invalid-argument";
    pub const INTERNAL: &str = "internal";
}

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::event::EventDocument;

    #[test]
    fn test_validation_error_names_field() {
        let error = SharedError::validation("contactemail", "Contact email must contain '@'");
        assert_eq!(error.field(), Some("contactemail"));
        assert_eq!(
            error.to_string(),
            "Validation error in field 'contactemail': Contact email must contain '@'"
        );
    }

    #[test]
    fn test_undecodable_document_is_serialization_error() {
        let err = serde_json::from_str::<EventDocument>(r#"{"name": 42}"#).unwrap_err();
        let error = SharedError::from(err);
        assert_eq!(error.field(), None);
        assert!(error.to_string().starts_with("Serialization error: JSON error:"));
    }
}
