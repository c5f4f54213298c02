//! Document Collections
//!
//! The backend stores schemaless JSON documents in two collections, `events`
//! and `users`, and enforces per-collection access rules:
//!
//! - **`events`** - anyone may read. Creating requires a session and an
//!   `organisation` equal to the caller. Overwriting, merging and deleting
//!   require the caller to be the stored organiser; `organisation` never
//!   changes after creation.
//! - **`users`** - a profile document is readable and writable only by the
//!   account whose id it is stored under. Listing is denied.
//!
//! # Module Structure
//!
//! ```text
//! documents/
//! ├── mod.rs       - Collection names and access rules
//! ├── db.rs        - SQLite queries
//! └── handlers.rs  - HTTP handlers
//! ```

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

use crate::backend::error::BackendError;
use crate::shared::document::{EVENTS_COLLECTION, USERS_COLLECTION};

/// Field holding an event's organiser
pub const ORGANISATION_FIELD: &str = "organisation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Events,
    Users,
}

impl Collection {
    /// Resolve a collection from its path segment
    pub fn from_name(name: &str) -> Result<Self, BackendError> {
        match name {
            EVENTS_COLLECTION => Ok(Self::Events),
            USERS_COLLECTION => Ok(Self::Users),
            other => Err(BackendError::not_found(format!("Unknown collection: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => EVENTS_COLLECTION,
            Self::Users => USERS_COLLECTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::from_name("events").unwrap(), Collection::Events);
        assert_eq!(Collection::from_name("users").unwrap(), Collection::Users);
        assert_eq!(Collection::Users.as_str(), "users");
        assert!(Collection::from_name("accounts").is_err());
    }
}
