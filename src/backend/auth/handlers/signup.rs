/**
 * Signup Handler
 *
 * Implements POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate email format and password length
 * 2. Check the email is not taken
 * 3. Hash password using bcrypt
 * 4. Create the account
 * 5. Return a token and the account
 *
 * The profile document is written separately by the client, keyed by the
 * returned account id.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::auth_response;
use crate::backend::auth::users::{create_account, get_account_by_email, is_unique_violation};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::api::{AuthResponse, CredentialsRequest};
use crate::shared::profile::{validate_email, validate_password};

/// Sign up handler
///
/// # Errors
///
/// * `400 auth/invalid-email` - email has no `@` with text on both sides
/// * `400 auth/weak-password` - password shorter than six characters
/// * `409 auth/email-already-in-use` - email already registered
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let email = request.email.trim();
    tracing::info!("Signup request for: {}", email);

    validate_email(email).map_err(|_| BackendError::invalid_email())?;
    validate_password(&request.password).map_err(|_| BackendError::weak_password())?;

    if get_account_by_email(&state.pool, email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::email_in_use());
    }

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;

    let account = create_account(&state.pool, email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::email_in_use()
            } else {
                e.into()
            }
        })?;

    tracing::info!("Account created: {} ({})", account.id, account.email);
    Ok((StatusCode::CREATED, Json(auth_response(&state, &account)?)))
}
