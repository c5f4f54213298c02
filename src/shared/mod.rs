//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the client and the backend service. These types are used for
//! serialization over the document/auth HTTP API and by the store.
//!
//! # Overview
//!
//! - **`document`** - Schemaless JSON documents and field maps
//! - **`event`** - Event drafts, stored documents and read-back events
//! - **`profile`** - User profiles, auth users and auth forms
//! - **`search`** - Keyword search over fetched events
//! - **`error`** - Shared error types and provider error codes
//! - **`config`** - Client configuration
//! - **`api`** - Request and response bodies of the backend HTTP API

/// HTTP API request/response bodies
pub mod api;

/// Document store types
pub mod document;

/// Event records
pub mod event;

/// Profiles and auth forms
pub mod profile;

/// Keyword search over events
pub mod search;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, BackendKind, ConfigError};
pub use document::{Document, Fields, EVENTS_COLLECTION, USERS_COLLECTION};
pub use error::SharedError;
pub use event::{Event, EventDocument, EventDraft};
pub use profile::{AccountDetails, AuthUser, LoginForm, ProfileUpdate, SignupForm, UserProfile};
pub use search::{search_events, SearchTerms};
