//! Profiles, Accounts and Auth Forms
//!
//! A profile is the user-facing identity record stored in the `users`
//! collection under the auth user's id. It is distinct from the auth account
//! (email + password) held by the provider.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Shortest password the auth provider accepts
pub const MIN_PASSWORD_LEN: usize = 6;

/// Profile document body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub email: String,
}

/// Signed-in user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub description: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Name cannot be empty"));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// Profile document written for the new account
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
            email: self.email.trim().to_string(),
        }
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub description: String,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.name.trim().is_empty() {
            return Err(SharedError::validation("name", "Name cannot be empty"));
        }
        Ok(())
    }
}

/// Auth account changes; `None` leaves a credential untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl AccountDetails {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Basic shape check: something on both sides of an `@`
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SharedError::validation("email", "The email address is badly formatted.")),
    }
}

pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password should be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}
