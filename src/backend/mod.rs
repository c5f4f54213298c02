//! Backend Module
//!
//! Reference backend service for EventBoard: a document database with two
//! collections and an email/password auth provider, served over HTTP.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route table and router assembly
//! - **`auth`** - Accounts, JWT tokens, auth handlers
//! - **`documents`** - Collections, access rules, document handlers
//! - **`middleware`** - Bearer-token extractor
//! - **`error`** - Backend error type and its JSON response
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── documents/      - Document collections
//! ├── middleware/     - Request extractors
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the SQLite pool and the server configuration; handlers
//! extract it with `State<AppState>`.
//!
//! # Storage
//!
//! SQLite through `sqlx`: an `accounts` table and a `documents` table keyed
//! by `(collection, id)` holding JSON bodies.

/// Server initialization, configuration and state
pub mod server;

/// Route configuration
pub mod routes;

/// Accounts and tokens
pub mod auth;

/// Document collections
pub mod documents;

/// Request extractors
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{create_app, create_app_with_pool, AppState, ServerConfig};
