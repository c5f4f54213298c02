/**
 * Login Handler
 *
 * Implements POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up the account by email
 * 2. Verify the password using bcrypt
 * 3. Return a token and the account
 *
 * Unknown emails answer `auth/user-not-found` and bad passwords
 * `auth/wrong-password`, which the client reports to the user verbatim.
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::handlers::auth_response;
use crate::backend::auth::users::get_account_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::api::{AuthResponse, CredentialsRequest};

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let email = request.email.trim();
    tracing::info!("Login request for: {}", email);

    let account = get_account_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Account not found: {}", email);
            BackendError::user_not_found()
        })?;

    if !verify(&request.password, &account.password_hash)? {
        tracing::warn!("Invalid password for account: {}", account.id);
        return Err(BackendError::wrong_password());
    }

    tracing::info!("Account logged in: {} ({})", account.id, account.email);
    Ok(Json(auth_response(&state, &account)?))
}
