/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - Account registration
 * - `POST /api/auth/login` - Login
 * - `GET /api/auth/me` - Current account (requires authentication)
 * - `PUT /api/auth/email` - Change email (requires authentication)
 * - `PUT /api/auth/password` - Change password (requires authentication)
 * - `DELETE /api/auth/account` - Delete account (requires authentication)
 *
 * ## Collections
 * - `GET|POST /api/collections/{collection}`
 * - `GET|PUT|PATCH|DELETE /api/collections/{collection}/{id}`
 *
 * Access rules are checked in the collection handlers.
 */

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{change_email, change_password, delete_account, get_me, login, signup};
use crate::backend::documents::handlers::{
    create_document, delete_document, get_document, list_documents, set_document, update_document,
};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/email", put(change_email))
        .route("/api/auth/password", put(change_password))
        .route("/api/auth/account", axum::routing::delete(delete_account))
        // Document collections
        .route(
            "/api/collections/{collection}",
            get(list_documents).post(create_document),
        )
        .route(
            "/api/collections/{collection}/{id}",
            get(get_document)
                .put(set_document)
                .patch(update_document)
                .delete(delete_document),
        )
}
