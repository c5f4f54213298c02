//! Authentication Module
//!
//! Email/password accounts for the backend service.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: email and password → account created → token returned
//! 2. **Login**: email and password → credentials verified → token returned
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` → the
//!    `AuthUser` extractor verifies it and loads the account
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are HS256-signed and expire after `TOKEN_TTL_DAYS` days

/// Account data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{change_email, change_password, delete_account, get_me, login, signup};
