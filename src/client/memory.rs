//! In-Process Backend
//!
//! `MemoryBackend` keeps both collections and the auth accounts in memory.
//! It follows the same contract as the HTTP adapter (ids assigned on `add`,
//! insertion-ordered reads, provider-style auth errors) and backs the test
//! suite and the desktop app's `memory` mode. Nothing is persisted.
//!
//! `set_offline(true)` makes every call fail with a network error, and
//! `fail_next` makes one named operation fail once. That is how the error
//! paths of the store are exercised.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio::sync::watch;
use uuid::Uuid;

use crate::client::adapter::{AdapterError, AdapterResult, AuthProvider, Backend, Collection};
use crate::shared::document::{merge_fields, Document, Fields, EVENTS_COLLECTION, USERS_COLLECTION};
use crate::shared::profile::{validate_email, AuthUser, MIN_PASSWORD_LEN};

/// Injected failures shared by the collections and the auth handle
#[derive(Clone, Default)]
struct Faults {
    offline: Arc<AtomicBool>,
    queued: Arc<Mutex<Vec<(String, AdapterError)>>>,
}

impl Faults {
    /// Fail if offline, or if a failure is queued for `scope.operation`
    fn check(&self, scope: &str, operation: &str) -> AdapterResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AdapterError::Network("backend unreachable".to_string()));
        }
        let mut queued = self.queued.lock().unwrap_or_else(PoisonError::into_inner);
        let position = queued
            .iter()
            .position(|(key, _)| key.split_once('.') == Some((scope, operation)));
        match position {
            Some(index) => Err(queued.remove(index).1),
            None => Ok(()),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Documents and accounts held in memory
#[derive(Clone)]
pub struct MemoryBackend {
    events: MemoryCollection,
    users: MemoryCollection,
    auth: MemoryAuth,
    faults: Faults,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let faults = Faults::default();
        Self {
            events: MemoryCollection::new(EVENTS_COLLECTION, faults.clone()),
            users: MemoryCollection::new(USERS_COLLECTION, faults.clone()),
            auth: MemoryAuth::new(faults.clone()),
            faults,
        }
    }

    /// Simulate losing (or regaining) the connection to the backend
    pub fn set_offline(&self, offline: bool) {
        self.faults.offline.store(offline, Ordering::SeqCst);
    }

    /// Make the next call of `operation` fail with `error`.
    ///
    /// Operations are named `<collection>.<method>` (`users.set`,
    /// `events.delete`) or `auth.<method>` (`auth.delete_user`).
    pub fn fail_next(&self, operation: &str, error: AdapterError) {
        self.faults
            .queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((operation.to_string(), error));
    }
}

impl Backend for MemoryBackend {
    type Collection = MemoryCollection;
    type Auth = MemoryAuth;

    fn events(&self) -> &MemoryCollection {
        &self.events
    }

    fn users(&self) -> &MemoryCollection {
        &self.users
    }

    fn auth(&self) -> &MemoryAuth {
        &self.auth
    }
}

#[derive(Clone)]
pub struct MemoryCollection {
    name: &'static str,
    docs: Arc<RwLock<Vec<Document>>>,
    faults: Faults,
}

impl MemoryCollection {
    fn new(name: &'static str, faults: Faults) -> Self {
        Self {
            name,
            docs: Arc::new(RwLock::new(Vec::new())),
            faults,
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Collection for MemoryCollection {
    fn name(&self) -> &str {
        self.name
    }

    async fn add(&self, data: Fields) -> AdapterResult<String> {
        self.faults.check(self.name, "add")?;
        let id = new_id();
        self.docs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Document::new(id.clone(), data));
        Ok(id)
    }

    async fn get(&self) -> AdapterResult<Vec<Document>> {
        self.faults.check(self.name, "get")?;
        Ok(self.docs.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn get_by_id(&self, id: &str) -> AdapterResult<Option<Document>> {
        self.faults.check(self.name, "get_by_id")?;
        let docs = self.docs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(docs.iter().find(|doc| doc.id == id).cloned())
    }

    async fn set(&self, id: &str, data: Fields) -> AdapterResult<()> {
        self.faults.check(self.name, "set")?;
        let mut docs = self.docs.write().unwrap_or_else(PoisonError::into_inner);
        match docs.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => doc.data = data,
            None => docs.push(Document::new(id, data)),
        }
        Ok(())
    }

    async fn update(&self, id: &str, fields: Fields) -> AdapterResult<()> {
        self.faults.check(self.name, "update")?;
        let mut docs = self.docs.write().unwrap_or_else(PoisonError::into_inner);
        let doc = docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| AdapterError::NotFound(format!("{}/{}", self.name, id)))?;
        merge_fields(&mut doc.data, fields);
        Ok(())
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.faults.check(self.name, "delete")?;
        self.docs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|doc| doc.id != id);
        Ok(())
    }
}

struct Account {
    uid: String,
    email: String,
    password: String,
}

/// Email/password accounts held in memory; passwords are compared in plain text
#[derive(Clone)]
pub struct MemoryAuth {
    accounts: Arc<Mutex<Vec<Account>>>,
    current: Arc<watch::Sender<Option<AuthUser>>>,
    faults: Faults,
}

impl MemoryAuth {
    fn new(faults: Faults) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            current: Arc::new(current),
            faults,
        }
    }

    fn accounts(&self) -> MutexGuard<'_, Vec<Account>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_user(&self) -> AdapterResult<AuthUser> {
        self.current_user().ok_or(AdapterError::Unauthenticated)
    }
}

impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AdapterResult<AuthUser> {
        self.faults.check("auth", "sign_in")?;
        let user = {
            let accounts = self.accounts();
            let account = accounts
                .iter()
                .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
                .ok_or(AdapterError::UserNotFound)?;
            if account.password != password {
                return Err(AdapterError::WrongPassword);
            }
            AuthUser {
                uid: account.uid.clone(),
                email: account.email.clone(),
            }
        };
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AdapterResult<AuthUser> {
        self.faults.check("auth", "sign_up")?;
        let email = email.trim();
        validate_email(email).map_err(|_| AdapterError::InvalidEmail)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdapterError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let user = {
            let mut accounts = self.accounts();
            if accounts.iter().any(|a| a.email.eq_ignore_ascii_case(email)) {
                return Err(AdapterError::EmailInUse);
            }
            let account = Account {
                uid: new_id(),
                email: email.to_string(),
                password: password.to_string(),
            };
            let user = AuthUser {
                uid: account.uid.clone(),
                email: account.email.clone(),
            };
            accounts.push(account);
            user
        };
        self.current.send_replace(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AdapterResult<()> {
        self.faults.check("auth", "sign_out")?;
        self.current.send_replace(None);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.current.borrow().clone()
    }

    async fn update_email(&self, email: &str) -> AdapterResult<()> {
        self.faults.check("auth", "update_email")?;
        let user = self.require_user()?;
        let email = email.trim();
        validate_email(email).map_err(|_| AdapterError::InvalidEmail)?;
        {
            let mut accounts = self.accounts();
            if accounts
                .iter()
                .any(|a| a.uid != user.uid && a.email.eq_ignore_ascii_case(email))
            {
                return Err(AdapterError::EmailInUse);
            }
            let account = accounts
                .iter_mut()
                .find(|a| a.uid == user.uid)
                .ok_or(AdapterError::UserNotFound)?;
            account.email = email.to_string();
        }
        self.current.send_replace(Some(AuthUser {
            uid: user.uid,
            email: email.to_string(),
        }));
        Ok(())
    }

    async fn update_password(&self, password: &str) -> AdapterResult<()> {
        self.faults.check("auth", "update_password")?;
        let user = self.require_user()?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdapterError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        let mut accounts = self.accounts();
        let account = accounts
            .iter_mut()
            .find(|a| a.uid == user.uid)
            .ok_or(AdapterError::UserNotFound)?;
        account.password = password.to_string();
        Ok(())
    }

    async fn delete_user(&self) -> AdapterResult<()> {
        self.faults.check("auth", "delete_user")?;
        let user = self.require_user()?;
        self.accounts().retain(|a| a.uid != user.uid);
        self.current.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.current.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::document::to_fields;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        to_fields(&value).unwrap()
    }

    #[tokio::test]
    async fn test_collection_crud() {
        let backend = MemoryBackend::new();
        let events = backend.events();

        let a = events.add(fields(json!({"name": "a"}))).await.unwrap();
        let b = events.add(fields(json!({"name": "b"}))).await.unwrap();
        assert_ne!(a, b);

        let all = events.get().await.unwrap();
        assert_eq!(all.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(), vec![a.as_str(), b.as_str()]);

        events.update(&a, fields(json!({"name": "a2", "x": 1}))).await.unwrap();
        let doc = events.get_by_id(&a).await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "a2");
        assert_eq!(doc.data["x"], 1);

        events.delete(&a).await.unwrap();
        events.delete(&a).await.unwrap();
        assert!(events.get_by_id(&a).await.unwrap().is_none());
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let backend = MemoryBackend::new();
        let result = backend.users().update("nope", Fields::new()).await;
        assert_matches!(result, Err(AdapterError::NotFound(path)) if path == "users/nope");
    }

    #[tokio::test]
    async fn test_set_creates_then_overwrites() {
        let backend = MemoryBackend::new();
        let users = backend.users();
        users.set("u1", fields(json!({"name": "Ada", "email": "a@b"}))).await.unwrap();
        users.set("u1", fields(json!({"name": "Ada L"}))).await.unwrap();

        let doc = users.get_by_id("u1").await.unwrap().unwrap();
        assert_eq!(doc.data.get("email"), None);
        assert_eq!(doc.data["name"], "Ada L");
    }

    #[tokio::test]
    async fn test_auth_errors() {
        let backend = MemoryBackend::new();
        let auth = backend.auth();

        assert_matches!(auth.sign_up("bad", "password").await, Err(AdapterError::InvalidEmail));
        assert_matches!(auth.sign_up("a@b.c", "123").await, Err(AdapterError::WeakPassword { .. }));

        auth.sign_up("a@b.c", "secret1").await.unwrap();
        assert_matches!(auth.sign_up("A@B.C", "secret1").await, Err(AdapterError::EmailInUse));

        auth.sign_out().await.unwrap();
        assert_matches!(auth.sign_in("a@b.c", "nope").await, Err(AdapterError::WrongPassword));
        assert_matches!(auth.sign_in("x@y.z", "secret1").await, Err(AdapterError::UserNotFound));
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_auth_changes_are_broadcast() {
        let backend = MemoryBackend::new();
        let auth = backend.auth();
        let mut rx = auth.subscribe();
        assert!(rx.borrow().is_none());

        let user = auth.sign_up("a@b.c", "secret1").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&user));

        auth.delete_user().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert_matches!(auth.sign_in("a@b.c", "secret1").await, Err(AdapterError::UserNotFound));
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let backend = MemoryBackend::new();
        backend.set_offline(true);
        assert_matches!(backend.events().get().await, Err(AdapterError::Network(_)));
        assert_matches!(backend.auth().sign_in("a@b.c", "x").await, Err(AdapterError::Network(_)));

        backend.set_offline(false);
        assert!(backend.events().get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fail_next_fails_one_call() {
        let backend = MemoryBackend::new();
        backend.fail_next("users.set", AdapterError::Network("timeout".to_string()));

        // other collections and operations are unaffected
        backend.events().set("e1", Fields::new()).await.unwrap();
        backend.users().get().await.unwrap();

        assert_matches!(
            backend.users().set("u1", Fields::new()).await,
            Err(AdapterError::Network(_))
        );
        backend.users().set("u1", Fields::new()).await.unwrap();
    }
}
