use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::runtime::Handle;

use crate::client::{
    AuthPhase, Backend, DeleteEvent, Notice, NoticeLog, Notifier, Route, SaveAccountDetails,
    SaveProfile, SessionHandle, Store,
};
use crate::shared::event::Event;
use crate::shared::profile::{AuthUser, LoginForm, ProfileUpdate, SignupForm};
use crate::shared::search::SearchTerms;

mod forms;

pub use forms::{AccountFormState, EventFormState};

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: Instant,
}

/// Central application state shared across egui views.
///
/// Domain state lives in the [`Store`]; this struct only holds what the
/// views edit between frames (form buffers, confirmations, toasts).
pub struct AppState<B: Backend> {
    store: Arc<Store<B>>,
    session: SessionHandle,
    notices: NoticeLog,
    runtime: Handle,
    ctx: egui::Context,
    in_flight: Arc<AtomicUsize>,
    toasts: Vec<Toast>,
    shown_route: Option<Route>,

    pub login_form: LoginForm,
    pub signup_form: SignupForm,
    pub confirm_password: String,
    pub is_signup_mode: bool,
    pub search_input: String,
    pub event_form: EventFormState,
    pub profile_form: Option<ProfileUpdate>,
    pub account_form: AccountFormState,
    pub confirm_delete_account: bool,
    pub confirm_delete_event: Option<String>,
}

impl<B: Backend> AppState<B> {
    pub fn new(
        store: Arc<Store<B>>,
        session: SessionHandle,
        notices: NoticeLog,
        runtime: Handle,
        ctx: egui::Context,
    ) -> Self {
        Self {
            store,
            session,
            notices,
            runtime,
            ctx,
            in_flight: Arc::new(AtomicUsize::new(0)),
            toasts: Vec::new(),
            shown_route: None,
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            confirm_password: String::new(),
            is_signup_mode: false,
            search_input: String::new(),
            event_form: EventFormState::blank(),
            profile_form: None,
            account_form: AccountFormState::default(),
            confirm_delete_account: false,
            confirm_delete_event: None,
        }
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn phase(&self) -> AuthPhase {
        self.session.phase()
    }

    /// Signed-in user as last reported by the auth provider
    pub fn auth_user(&self) -> Option<AuthUser> {
        self.session.phase().user().cloned()
    }

    /// Whether any dispatched action is still running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Run an action on the runtime and repaint when it settles
    pub fn dispatch<F, Fut>(&self, action: &'static str, run: F)
    where
        F: FnOnce(Arc<Store<B>>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!(action, "dispatch");
        let task = run(self.store.clone());
        let in_flight = self.in_flight.clone();
        let ctx = self.ctx.clone();

        in_flight.fetch_add(1, Ordering::SeqCst);
        self.runtime.spawn(async move {
            task.await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            ctx.request_repaint();
        });
    }

    /// Report a problem caught in the view before anything was dispatched
    pub fn notify_error(&self, message: impl Into<String>) {
        self.notices.notify(Notice::error(message));
    }

    /// Move new notices into the toast list and drop expired toasts.
    ///
    /// Returns how long until the next toast expires.
    pub fn poll_notices(&mut self, now: Instant) -> Option<Duration> {
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.extend(self.notices.drain().into_iter().map(|notice| Toast {
            notice,
            expires_at: now + TOAST_TTL,
        }));
        self.toasts
            .iter()
            .map(|toast| toast.expires_at.saturating_duration_since(now))
            .min()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn dismiss_toast(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    /// Reset per-view buffers when the router has moved since last frame
    pub fn sync_route(&mut self) -> Route {
        let route = self.store.current_route();
        if self.shown_route.as_ref() != Some(&route) {
            tracing::debug!(route = %route, "entering view");
            self.enter(&route);
            self.shown_route = Some(route.clone());
        }
        route
    }

    fn enter(&mut self, route: &Route) {
        match route {
            Route::Login => {
                self.login_form.password.clear();
                self.signup_form.password.clear();
                self.confirm_password.clear();
            }
            Route::NewEvent => self.event_form = EventFormState::blank(),
            Route::EditEvent(id) => match self.store.event(id) {
                Some(event) => self.event_form = EventFormState::from_event(&event),
                None => {
                    tracing::warn!(event_id = %id, "no such event to edit");
                    self.event_form = EventFormState::blank();
                    self.notify_error("That event could not be found.");
                    self.store.navigate(Route::Home);
                }
            },
            Route::Account => {
                self.profile_form = None;
                self.account_form = AccountFormState::default();
                self.confirm_delete_account = false;
                self.confirm_delete_event = None;
            }
            Route::Home => {}
        }
    }

    /// Move to `route`, or to the login view when it needs a session
    pub fn navigate(&self, route: Route) {
        if route.requires_auth() && !self.store.is_authenticated() {
            self.store.navigate(Route::Login);
        } else {
            self.store.navigate(route);
        }
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.login_form.password.clear();
        self.signup_form.password.clear();
        self.confirm_password.clear();
    }

    pub fn submit_login(&mut self) {
        let form = self.login_form.clone();
        self.login_form.password.clear();
        self.dispatch("login", |store| async move {
            let _ = store.login(form).await;
        });
    }

    pub fn submit_signup(&mut self) {
        if self.signup_form.password != self.confirm_password {
            self.notify_error("Passwords do not match");
            return;
        }
        let form = self.signup_form.clone();
        self.signup_form.password.clear();
        self.confirm_password.clear();
        self.dispatch("signup", |store| async move {
            let _ = store.signup(form).await;
        });
    }

    pub fn logout(&self) {
        self.dispatch("logout", |store| async move {
            let _ = store.logout().await;
        });
    }

    pub fn refresh_events(&self) {
        self.dispatch("get_events", |store| async move {
            let _ = store.get_events().await;
        });
    }

    /// Search as the user types; blank input shows the full list instead
    pub fn search(&self) {
        let terms = SearchTerms::parse(&self.search_input);
        if terms.is_empty() {
            return;
        }
        self.dispatch("search_events", |store| async move {
            let _ = store.search_events(&terms).await;
        });
    }

    /// Events to show on the home view for the current search input
    pub fn visible_events(&self) -> Vec<Event> {
        if SearchTerms::parse(&self.search_input).is_empty() {
            self.store.events()
        } else {
            self.store.searched_events()
        }
    }

    pub fn submit_event_form(&mut self) {
        let draft = match self.event_form.to_draft() {
            Ok(draft) => draft,
            Err(e) => return self.notify_error(e.to_string()),
        };

        match self.event_form.editing.clone() {
            None => self.dispatch("add_event", |store| async move {
                if store.add_event(draft).await.is_ok() {
                    store.navigate(Route::Home);
                }
            }),
            Some(id) => {
                let organisation = self
                    .store
                    .event(&id)
                    .map(|event| event.organisation)
                    .unwrap_or_default();
                let event = Event {
                    id,
                    organisation,
                    details: draft,
                };
                self.dispatch("update_event", |store| async move {
                    if store.update_event(event).await.is_ok() {
                        store.navigate(Route::Account);
                    }
                });
            }
        }
    }

    pub fn save_profile(&self) {
        let (Some(user), Some(changes)) = (self.auth_user(), self.profile_form.clone()) else {
            return self.notify_error("You need to be logged in to do that.");
        };
        self.dispatch("save_profile", |store| async move {
            let _ = store.save_profile(SaveProfile { user, changes }).await;
        });
    }

    pub fn save_account_details(&mut self) {
        let Some(user) = self.auth_user() else {
            return self.notify_error("You need to be logged in to do that.");
        };
        let details = match self.account_form.to_details() {
            Ok(details) => details,
            Err(e) => return self.notify_error(e.to_string()),
        };
        self.account_form.clear_passwords();
        self.dispatch("save_account_details", |store| async move {
            let _ = store
                .save_account_details(SaveAccountDetails { user, details })
                .await;
        });
    }

    pub fn delete_account(&mut self) {
        self.confirm_delete_account = false;
        self.dispatch("delete_account", |store| async move {
            let _ = store.delete_account().await;
        });
    }

    pub fn delete_event(&mut self, event_id: String) {
        self.confirm_delete_event = None;
        self.dispatch("delete_event", |store| async move {
            let _ = store
                .delete_event(DeleteEvent {
                    event_id,
                    show_confirmation: true,
                })
                .await;
        });
    }
}
