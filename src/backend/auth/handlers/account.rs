/**
 * Account Maintenance Handlers
 *
 * - PUT /api/auth/email - change the email; answers with a fresh token
 *   since the old one carries the old email
 * - PUT /api/auth/password - change the password
 * - DELETE /api/auth/account - delete the account and its profile document
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::hash;

use crate::backend::auth::handlers::auth_response;
use crate::backend::auth::users::{
    self, get_account_by_email, is_unique_violation, update_email, update_password_hash,
};
use crate::backend::documents::db::delete_document;
use crate::backend::documents::Collection;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::api::{AuthResponse, EmailChangeRequest, PasswordChangeRequest};
use crate::shared::profile::{validate_email, validate_password};

pub async fn change_email(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<EmailChangeRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let email = request.email.trim();
    validate_email(email).map_err(|_| BackendError::invalid_email())?;

    if let Some(existing) = get_account_by_email(&state.pool, email).await? {
        if existing.id != user.user_id {
            return Err(BackendError::email_in_use());
        }
    }

    let account = update_email(&state.pool, &user.user_id, email)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::email_in_use()
            } else {
                e.into()
            }
        })?;

    tracing::info!("Email changed for account {}", account.id);
    Ok(Json(auth_response(&state, &account)?))
}

pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<PasswordChangeRequest>,
) -> Result<StatusCode, BackendError> {
    validate_password(&request.password).map_err(|_| BackendError::weak_password())?;

    let password_hash = hash(&request.password, state.config.bcrypt_cost)?;
    update_password_hash(&state.pool, &user.user_id, &password_hash).await?;

    tracing::info!("Password changed for account {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, BackendError> {
    delete_document(&state.pool, Collection::Users.as_str(), &user.user_id).await?;
    users::delete_account(&state.pool, &user.user_id).await?;

    tracing::info!("Account deleted: {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
