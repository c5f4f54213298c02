/**
 * Get Current User Handler
 *
 * Implements GET /api/auth/me, returning the account behind the bearer
 * token (no password hash).
 */

use axum::response::Json;

use crate::backend::middleware::AuthUser;
use crate::shared::api::AccountResponse;

pub async fn get_me(AuthUser(user): AuthUser) -> Json<AccountResponse> {
    Json(AccountResponse {
        id: user.user_id,
        email: user.email,
    })
}
