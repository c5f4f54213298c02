//! EventBoard - Main Library
//!
//! EventBoard is an event-listing application: users sign up, log in, publish
//! events with dates, times, location, tags and contact details, and search
//! the listing by keyword.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the client and the backend service
//!   - Event and profile records, document field maps
//!   - Keyword search
//!   - Error types and client configuration
//!
//! - **`client`** - Client core used by the desktop app
//!   - Backend adapter traits with HTTP and in-memory implementations
//!   - Shared state store (actions and mutations)
//!   - Router and auth-driven session bootstrap
//!
//! - **`backend`** - Reference backend service (only compiled with `ssr`)
//!   - Axum HTTP server over SQLite
//!   - Email/password accounts with bcrypt and JWT bearer tokens
//!   - Document collections with per-collection access rules
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!
//! # Feature Flags
//!
//! - **`ssr`** - enables the backend service and its dependencies
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! # #[cfg(feature = "ssr")]
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use eventboard::backend::server::{config::ServerConfig, init::create_app};
//!
//! let app = create_app(ServerConfig::from_env()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use eventboard::client::{MemoryBackend, NoticeLog, Store};
//!
//! let notices = NoticeLog::new();
//! let store = Arc::new(Store::new(MemoryBackend::new(), Arc::new(notices.clone())));
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for serialization and validation
//! - `client::AdapterError` and `client::StoreError` on the client
//! - `backend::error::BackendError` on the server

/// Shared types and data structures
pub mod shared;

/// Client core: adapters, store, routing, session
pub mod client;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
