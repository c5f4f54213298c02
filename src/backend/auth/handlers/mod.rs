//! Authentication Handlers Module
//!
//! HTTP handlers for the email/password auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and the shared token helper
//! ├── signup.rs   - Account registration
//! ├── login.rs    - Credential check
//! ├── me.rs       - Current account
//! └── account.rs  - Email/password change and account deletion
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me
//! - **`change_email`** - PUT /api/auth/email
//! - **`change_password`** - PUT /api/auth/password
//! - **`delete_account`** - DELETE /api/auth/account
//!
//! Signup, login and email change answer with `{token, user{id, email}}`.

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Account maintenance handlers
pub mod account;

pub use account::{change_email, change_password, delete_account};
pub use login::login;
pub use me::get_me;
pub use signup::signup;

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::Account;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::api::AuthResponse;

/// Issue a fresh bearer token for `account`
pub(crate) fn auth_response(state: &AppState, account: &Account) -> Result<AuthResponse, BackendError> {
    let token = create_token(
        &account.id,
        &account.email,
        &state.config.jwt_secret,
        state.config.token_ttl_days,
    )?;
    Ok(AuthResponse {
        token,
        user: account.to_response(),
    })
}
