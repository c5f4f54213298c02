/**
 * HTTP Backend Adapter
 *
 * Talks to the reference backend service with `reqwest`. The signed-in
 * user's bearer token is kept on the shared connection and attached to every
 * request; signing out only forgets it (tokens are stateless).
 *
 * # Endpoints
 *
 * - `POST /api/auth/signup`, `POST /api/auth/login`
 * - `PUT /api/auth/email`, `PUT /api/auth/password`, `DELETE /api/auth/account`
 * - `GET|POST /api/collections/{collection}`
 * - `GET|PUT|PATCH|DELETE /api/collections/{collection}/{id}`
 *
 * # Errors
 *
 * Failed requests carry a JSON `{error, code, status}` body; the code is
 * mapped back to an `AdapterError`. Bodies that do not parse fall back to the
 * HTTP status.
 */

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tokio::sync::watch;

use crate::client::adapter::{AdapterError, AdapterResult, AuthProvider, Backend, Collection};
use crate::shared::api::{
    ApiErrorBody, AuthResponse, CreatedResponse, CredentialsRequest, EmailChangeRequest,
    PasswordChangeRequest,
};
use crate::shared::config::AppConfig;
use crate::shared::document::{Document, Fields, EVENTS_COLLECTION, USERS_COLLECTION};
use crate::shared::profile::AuthUser;

/// Shared HTTP client, base URL and session token
struct Connection {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
    current: watch::Sender<Option<AuthUser>>,
}

impl Connection {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match self.token.read().unwrap_or_else(PoisonError::into_inner).as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> AdapterResult<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> AdapterResult<Response> {
        self.send(self.request(method, path).json(body)).await
    }

    fn start_session(&self, auth: AuthResponse) -> AuthUser {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(auth.token);
        let user: AuthUser = auth.user.into();
        tracing::debug!(uid = %user.uid, "HTTP session started");
        self.current.send_replace(Some(user.clone()));
        user
    }

    fn end_session(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.current.send_replace(None);
    }
}

async fn error_from_response(response: Response) -> AdapterError {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => AdapterError::from_code(&body.code, body.error),
        Err(_) => match status {
            StatusCode::UNAUTHORIZED => AdapterError::Unauthenticated,
            StatusCode::FORBIDDEN => AdapterError::PermissionDenied(status.to_string()),
            StatusCode::NOT_FOUND => AdapterError::NotFound(status.to_string()),
            _ => AdapterError::Other {
                code: status.as_str().to_string(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            },
        },
    }
}

/// Backend adapter for the reference backend service
#[derive(Clone)]
pub struct HttpBackend {
    events: HttpCollection,
    users: HttpCollection,
    auth: HttpAuth,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.server_url())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let (current, _) = watch::channel(None);
        let conn = Arc::new(Connection {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            current,
        });
        Self {
            events: HttpCollection::new(EVENTS_COLLECTION, conn.clone()),
            users: HttpCollection::new(USERS_COLLECTION, conn.clone()),
            auth: HttpAuth { conn },
        }
    }
}

impl Backend for HttpBackend {
    type Collection = HttpCollection;
    type Auth = HttpAuth;

    fn events(&self) -> &HttpCollection {
        &self.events
    }

    fn users(&self) -> &HttpCollection {
        &self.users
    }

    fn auth(&self) -> &HttpAuth {
        &self.auth
    }
}

#[derive(Clone)]
pub struct HttpCollection {
    name: &'static str,
    conn: Arc<Connection>,
}

impl HttpCollection {
    fn new(name: &'static str, conn: Arc<Connection>) -> Self {
        Self { name, conn }
    }

    fn path(&self) -> String {
        format!("/api/collections/{}", self.name)
    }

    fn doc_path(&self, id: &str) -> String {
        format!("/api/collections/{}/{}", self.name, id)
    }
}

impl Collection for HttpCollection {
    fn name(&self) -> &str {
        self.name
    }

    async fn add(&self, data: Fields) -> AdapterResult<String> {
        let response = self.conn.send_json(Method::POST, &self.path(), &data).await?;
        let created: CreatedResponse = response.json().await?;
        Ok(created.id)
    }

    async fn get(&self) -> AdapterResult<Vec<Document>> {
        let response = self.conn.send(self.conn.request(Method::GET, &self.path())).await?;
        Ok(response.json().await?)
    }

    async fn get_by_id(&self, id: &str) -> AdapterResult<Option<Document>> {
        let response = self
            .conn
            .request(Method::GET, &self.doc_path(id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(Some(response.json().await?))
    }

    async fn set(&self, id: &str, data: Fields) -> AdapterResult<()> {
        self.conn.send_json(Method::PUT, &self.doc_path(id), &data).await?;
        Ok(())
    }

    async fn update(&self, id: &str, fields: Fields) -> AdapterResult<()> {
        self.conn
            .send_json(Method::PATCH, &self.doc_path(id), &fields)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.conn
            .send(self.conn.request(Method::DELETE, &self.doc_path(id)))
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct HttpAuth {
    conn: Arc<Connection>,
}

impl HttpAuth {
    async fn authenticate(&self, path: &str, email: &str, password: &str) -> AdapterResult<AuthUser> {
        let body = CredentialsRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response = self.conn.send_json(Method::POST, path, &body).await?;
        let auth: AuthResponse = response.json().await?;
        Ok(self.conn.start_session(auth))
    }

    fn require_session(&self) -> AdapterResult<()> {
        let token = self.conn.token.read().unwrap_or_else(PoisonError::into_inner);
        match token.as_ref() {
            Some(_) => Ok(()),
            None => Err(AdapterError::Unauthenticated),
        }
    }
}

impl AuthProvider for HttpAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AdapterResult<AuthUser> {
        self.authenticate("/api/auth/login", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> AdapterResult<AuthUser> {
        self.authenticate("/api/auth/signup", email, password).await
    }

    async fn sign_out(&self) -> AdapterResult<()> {
        self.conn.end_session();
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.conn.current.borrow().clone()
    }

    async fn update_email(&self, email: &str) -> AdapterResult<()> {
        self.require_session()?;
        let body = EmailChangeRequest {
            email: email.trim().to_string(),
        };
        let response = self
            .conn
            .send_json(Method::PUT, "/api/auth/email", &body)
            .await?;
        let auth: AuthResponse = response.json().await?;
        self.conn.start_session(auth);
        Ok(())
    }

    async fn update_password(&self, password: &str) -> AdapterResult<()> {
        self.require_session()?;
        let body = PasswordChangeRequest {
            password: password.to_string(),
        };
        self.conn
            .send_json(Method::PUT, "/api/auth/password", &body)
            .await?;
        Ok(())
    }

    async fn delete_user(&self) -> AdapterResult<()> {
        self.require_session()?;
        self.conn
            .send(self.conn.request(Method::DELETE, "/api/auth/account"))
            .await?;
        self.conn.end_session();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.conn.current.subscribe()
    }
}
