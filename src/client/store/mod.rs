/**
 * Shared State Store
 *
 * A single store sits between the views and the backend. Views read state
 * through the accessors (which return clones) and change it by dispatching
 * actions. Actions call the backend adapter and then commit named
 * mutations; `commit` is the only writer of the state.
 *
 * # State
 *
 * - `events` - the last fetched event list
 * - `searched_events` - the last search result
 * - `user_profile` / `user_id` - the signed-in user's session
 *
 * # Concurrency
 *
 * The state lives behind a `std::sync::RwLock` that is never held across an
 * await, so the store can be shared through an `Arc` with any number of
 * in-flight actions. Concurrent writes to the same document race at the
 * backend and the last one wins.
 */

mod actions;
mod error;
mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

pub use actions::{messages, DeleteEvent, SaveAccountDetails, SaveProfile};
pub use error::{StoreError, StoreResult};
pub use state::{Mutation, State};

use crate::client::adapter::Backend;
use crate::client::notice::{Notice, Notifier};
use crate::client::routes::{Route, Router};
use crate::shared::event::Event;
use crate::shared::profile::UserProfile;

pub struct Store<B: Backend> {
    backend: B,
    state: RwLock<State>,
    router: Mutex<Router>,
    notifier: Arc<dyn Notifier>,
    /// Number of the most recently started search
    search_ticket: AtomicU64,
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_route(backend, notifier, Route::Home)
    }

    /// Start the router somewhere other than the home view
    pub fn with_route(backend: B, notifier: Arc<dyn Notifier>, initial: Route) -> Self {
        Self {
            backend,
            state: RwLock::new(State::default()),
            router: Mutex::new(Router::new(initial)),
            notifier,
            search_ticket: AtomicU64::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Snapshot of the whole state
    pub fn state(&self) -> State {
        self.read().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.read().events.clone()
    }

    pub fn searched_events(&self) -> Vec<Event> {
        self.read().searched_events.clone()
    }

    pub fn user_profile(&self) -> Option<UserProfile> {
        self.read().user_profile.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().user_id.is_some()
    }

    /// Fetched events organised by the signed-in user
    pub fn own_events(&self) -> Vec<Event> {
        self.read().own_events()
    }

    /// Look up a fetched event by id, in the event list or the last search
    pub fn event(&self, id: &str) -> Option<Event> {
        let state = self.read();
        state
            .events
            .iter()
            .chain(&state.searched_events)
            .find(|event| event.id == id)
            .cloned()
    }

    /// Apply a mutation. The only way state changes.
    pub fn commit(&self, mutation: Mutation) {
        tracing::debug!(mutation = mutation.name(), "commit");
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(mutation);
    }

    pub fn current_route(&self) -> Route {
        self.router().current().clone()
    }

    pub fn navigate(&self, route: Route) {
        self.router().push(route);
    }

    /// Go back in history; returns the route now shown
    pub fn back(&self) -> Route {
        let mut router = self.router();
        router.back();
        router.current().clone()
    }

    /// Forget the signed-in user without calling the backend
    pub fn clear_session(&self) {
        self.commit(Mutation::SetUserProfile(None));
        self.commit(Mutation::SetUserId(None));
    }

    /// Send the user to the login view if the current route needs a session
    pub fn redirect_if_guarded(&self) {
        let mut router = self.router();
        if router.current().requires_auth() {
            tracing::info!(from = %router.current(), "session required, redirecting to login");
            router.push(Route::Login);
        }
    }

    fn begin_search(&self) -> u64 {
        self.search_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit search results unless a newer search has started since
    fn finish_search(&self, ticket: u64, found: Vec<Event>) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if self.search_ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "dropping results of a superseded search");
            return false;
        }
        let mutation = Mutation::SetSearchedEvents(found);
        tracing::debug!(mutation = mutation.name(), "commit");
        state.apply(mutation);
        true
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn router(&self) -> std::sync::MutexGuard<'_, Router> {
        self.router.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify_success(&self, message: &str) {
        self.notifier.notify(Notice::success(message));
    }

    /// Surface a failed action as an error notice and a warning
    fn report<T>(&self, action: &'static str, result: StoreResult<T>) -> StoreResult<T> {
        if let Err(err) = &result {
            tracing::warn!(action, error = %err, "action failed");
            self.notifier.notify(Notice::error(err.to_string()));
        }
        result
    }
}
