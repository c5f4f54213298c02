/**
 * Authentication Extractor
 *
 * Extracts and verifies the JWT bearer token from the Authorization header
 * and checks that the account still exists. Handlers that require a session
 * take `AuthUser`; handlers open to anonymous callers take
 * `Option<AuthUser>` (a present but invalid token is still rejected).
 */

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_account_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated account data taken from the token and the database
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, BackendError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| BackendError::unauthenticated("Invalid Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| BackendError::unauthenticated("Invalid Authorization header format"))
}

async fn authenticate(token: &str, state: &AppState) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated("Invalid or expired token")
    })?;

    let account = get_account_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for unknown account {}", claims.sub);
            BackendError::unauthenticated("Account no longer exists")
        })?;

    Ok(AuthenticatedUser {
        user_id: account.id,
        email: account.email,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| BackendError::unauthenticated("Missing Authorization header"))?;
        Ok(AuthUser(authenticate(token, state).await?))
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(Some(AuthUser(authenticate(token, state).await?))),
            None => Ok(None),
        }
    }
}
