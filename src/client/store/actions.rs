//! Store actions
//!
//! Each public action wraps a private `*_inner` body so that every failure,
//! whatever step it comes from, is reported exactly once.

use serde_json::Value;

use super::{Mutation, Store, StoreError, StoreResult};
use crate::client::adapter::{AdapterError, AuthProvider, Backend, Collection};
use crate::client::routes::Route;
use crate::shared::document::{to_fields, Fields};
use crate::shared::error::SharedError;
use crate::shared::event::{Event, EventDocument, EventDraft};
use crate::shared::profile::{AccountDetails, AuthUser, LoginForm, ProfileUpdate, SignupForm, UserProfile};
use crate::shared::search::{search_events, SearchTerms};

/// Success notices shown to the user
pub mod messages {
    pub const EVENT_ADDED: &str = "Event added successfully!";
    pub const LOGGED_IN: &str = "Logged in successfully!";
    pub const ACCOUNT_CREATED: &str = "Account successfully created!";
    pub const LOGGED_OUT: &str = "Logged out successfully!";
    pub const PROFILE_SAVED: &str = "Profile successfully saved";
    pub const ACCOUNT_DETAILS_UPDATED: &str = "Account details successfully updated";
    pub const ACCOUNT_DELETED: &str = "Account successfully deleted";
    pub const EVENT_UPDATED: &str = "Event successfully updated";
    pub const EVENT_DELETED: &str = "Event successfully deleted";
}

/// Payload of [`Store::save_profile`]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveProfile {
    pub user: AuthUser,
    pub changes: ProfileUpdate,
}

/// Payload of [`Store::save_account_details`]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveAccountDetails {
    pub user: AuthUser,
    pub details: AccountDetails,
}

/// Payload of [`Store::delete_event`]
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteEvent {
    pub event_id: String,
    /// Show the "deleted" notice; bulk deletes turn it off
    pub show_confirmation: bool,
}

impl<B: Backend> Store<B> {
    /// Create an event organised by the signed-in user; returns its id
    pub async fn add_event(&self, draft: EventDraft) -> StoreResult<String> {
        let result = self.add_event_inner(draft).await;
        self.report("add_event", result)
    }

    async fn add_event_inner(&self, draft: EventDraft) -> StoreResult<String> {
        draft.validate()?;
        let organisation = self.require_user_id()?;
        let document = EventDocument {
            organisation,
            details: draft.normalized(),
        };
        let id = self.backend.events().add(to_fields(&document)?).await?;
        tracing::info!(event_id = %id, "event added");

        let mut events = self.events();
        events.push(Event {
            id: id.clone(),
            organisation: document.organisation,
            details: document.details,
        });
        self.commit(Mutation::SetEvents(events));
        self.notify_success(messages::EVENT_ADDED);
        Ok(id)
    }

    /// Fetch the whole `events` collection and replace the event list
    pub async fn get_events(&self) -> StoreResult<Vec<Event>> {
        let result = self.fetch_events().await;
        let events = self.report("get_events", result)?;
        self.commit(Mutation::SetEvents(events.clone()));
        Ok(events)
    }

    /// Fetch every event again and keep those matching any term.
    ///
    /// When searches overlap, only the most recently started one replaces
    /// the search results.
    pub async fn search_events(&self, terms: &SearchTerms) -> StoreResult<Vec<Event>> {
        let ticket = self.begin_search();
        let result = self.fetch_events().await;
        let events = self.report("search_events", result)?;
        let found = search_events(&events, terms);
        tracing::debug!(terms = ?terms.as_slice(), hits = found.len(), "search");
        self.finish_search(ticket, found.clone());
        Ok(found)
    }

    /// Sign in and load the profile. A failed sign-in leaves state untouched.
    pub async fn login(&self, form: LoginForm) -> StoreResult<UserProfile> {
        let result = self.login_inner(form).await;
        self.report("login", result)
    }

    async fn login_inner(&self, form: LoginForm) -> StoreResult<UserProfile> {
        let user = self
            .backend
            .auth()
            .sign_in(form.email.trim(), &form.password)
            .await?;
        let profile = self.fetch_user_profile_inner(&user).await?;
        tracing::info!(uid = %user.uid, "logged in");
        self.notify_success(messages::LOGGED_IN);
        Ok(profile)
    }

    /// Load `user`'s profile into the session and leave the login view
    pub async fn fetch_user_profile(&self, user: &AuthUser) -> StoreResult<UserProfile> {
        let result = self.fetch_user_profile_inner(user).await;
        self.report("fetch_user_profile", result)
    }

    async fn fetch_user_profile_inner(&self, user: &AuthUser) -> StoreResult<UserProfile> {
        let document = self
            .backend
            .users()
            .get_by_id(&user.uid)
            .await?
            .ok_or_else(|| StoreError::ProfileMissing(user.uid.clone()))?;
        let profile: UserProfile = document.decode()?;

        self.commit(Mutation::SetUserProfile(Some(profile.clone())));
        self.commit(Mutation::SetUserId(Some(user.uid.clone())));

        let mut router = self.router();
        if *router.current() == Route::Login {
            router.push(Route::Home);
        }
        Ok(profile)
    }

    /// Create the auth account and its profile document, then sign in
    pub async fn signup(&self, form: SignupForm) -> StoreResult<UserProfile> {
        let result = self.signup_inner(form).await;
        self.report("signup", result)
    }

    async fn signup_inner(&self, form: SignupForm) -> StoreResult<UserProfile> {
        form.validate()?;
        let profile_fields = to_fields(&form.profile())?;
        let user = self
            .backend
            .auth()
            .sign_up(form.email.trim(), &form.password)
            .await?;
        if let Err(err) = self.backend.users().set(&user.uid, profile_fields).await {
            self.discard_account(&user).await;
            return Err(err.into());
        }
        let profile = self.fetch_user_profile_inner(&user).await?;
        tracing::info!(uid = %user.uid, "account created");
        self.notify_success(messages::ACCOUNT_CREATED);
        Ok(profile)
    }

    pub async fn logout(&self) -> StoreResult<()> {
        let result = self.backend.auth().sign_out().await.map_err(StoreError::from);
        self.report("logout", result)?;
        self.clear_session();
        self.notify_success(messages::LOGGED_OUT);
        self.navigate(Route::Login);
        Ok(())
    }

    /// Update the profile's name and description
    pub async fn save_profile(&self, payload: SaveProfile) -> StoreResult<UserProfile> {
        let result = self.save_profile_inner(payload).await;
        self.report("save_profile", result)
    }

    async fn save_profile_inner(&self, payload: SaveProfile) -> StoreResult<UserProfile> {
        let SaveProfile { user, changes } = payload;
        self.ensure_current_user(&user)?;
        changes.validate()?;

        let changes = ProfileUpdate {
            name: changes.name.trim().to_string(),
            description: changes.description,
        };
        self.backend
            .users()
            .update(&user.uid, to_fields(&changes)?)
            .await?;
        self.notify_success(messages::PROFILE_SAVED);
        self.fetch_user_profile_inner(&user).await
    }

    /// Change the auth email and/or password; a new email is mirrored into
    /// the profile document
    pub async fn save_account_details(&self, payload: SaveAccountDetails) -> StoreResult<UserProfile> {
        let result = self.save_account_details_inner(payload).await;
        self.report("save_account_details", result)
    }

    async fn save_account_details_inner(
        &self,
        payload: SaveAccountDetails,
    ) -> StoreResult<UserProfile> {
        let SaveAccountDetails { mut user, details } = payload;
        self.ensure_current_user(&user)?;
        if details.is_empty() {
            return Err(SharedError::validation("email", "Nothing to update").into());
        }
        details.validate()?;

        let auth = self.backend.auth();
        if let Some(email) = details.email.as_deref().map(str::trim) {
            auth.update_email(email).await?;
            let mut fields = Fields::new();
            fields.insert("email".to_string(), Value::String(email.to_string()));
            self.backend.users().update(&user.uid, fields).await?;
            user.email = email.to_string();
        }
        if let Some(password) = details.password.as_deref() {
            auth.update_password(password).await?;
        }

        self.notify_success(messages::ACCOUNT_DETAILS_UPDATED);
        self.fetch_user_profile_inner(&user).await
    }

    /// Remove the auth account, then its profile document
    pub async fn delete_account(&self) -> StoreResult<()> {
        let result = self.delete_account_inner().await;
        self.report("delete_account", result)
    }

    async fn delete_account_inner(&self) -> StoreResult<()> {
        let uid = self.require_user_id()?;
        self.backend.auth().delete_user().await?;
        tracing::info!(uid = %uid, "account deleted");

        match self.backend.users().delete(&uid).await {
            Ok(()) => {}
            // signed out by now; the service drops the profile with the account
            Err(AdapterError::Unauthenticated) => {
                tracing::debug!(uid = %uid, "profile left to the backend")
            }
            Err(err) => tracing::warn!(uid = %uid, error = %err, "profile document left behind"),
        }
        self.clear_session();
        self.notify_success(messages::ACCOUNT_DELETED);
        self.navigate(Route::Login);
        Ok(())
    }

    /// Overwrite every field of a stored event. Only its organiser may do
    /// this and the stored organiser is kept.
    pub async fn update_event(&self, event: Event) -> StoreResult<()> {
        let result = self.update_event_inner(event).await;
        self.report("update_event", result)
    }

    async fn update_event_inner(&self, event: Event) -> StoreResult<()> {
        event.details.validate()?;
        let stored = self.owned_event(&event.id).await?;
        let updated = Event {
            id: stored.id,
            organisation: stored.organisation,
            details: event.details.normalized(),
        };
        self.backend
            .events()
            .set(&updated.id, to_fields(&updated.to_document())?)
            .await?;
        tracing::info!(event_id = %updated.id, "event updated");

        let replace = |mut events: Vec<Event>| {
            let slot = events.iter_mut().find(|e| e.id == updated.id)?;
            *slot = updated.clone();
            Some(events)
        };
        if let Some(events) = replace(self.events()) {
            self.commit(Mutation::SetEvents(events));
        }
        if let Some(found) = replace(self.searched_events()) {
            self.commit(Mutation::SetSearchedEvents(found));
        }
        self.notify_success(messages::EVENT_UPDATED);
        Ok(())
    }

    pub async fn delete_event(&self, payload: DeleteEvent) -> StoreResult<()> {
        let result = self.delete_event_inner(payload).await;
        self.report("delete_event", result)
    }

    async fn delete_event_inner(&self, payload: DeleteEvent) -> StoreResult<()> {
        let DeleteEvent {
            event_id,
            show_confirmation,
        } = payload;
        self.owned_event(&event_id).await?;
        self.backend.events().delete(&event_id).await?;
        tracing::info!(event_id = %event_id, "event deleted");

        let mut events = self.events();
        events.retain(|event| event.id != event_id);
        self.commit(Mutation::SetEvents(events));
        let mut found = self.searched_events();
        found.retain(|event| event.id != event_id);
        self.commit(Mutation::SetSearchedEvents(found));
        if show_confirmation {
            self.notify_success(messages::EVENT_DELETED);
        }
        self.navigate(Route::Account);
        Ok(())
    }

    async fn fetch_events(&self) -> StoreResult<Vec<Event>> {
        let documents = self.backend.events().get().await?;
        let mut events = Vec::with_capacity(documents.len());
        for document in &documents {
            match Event::from_document(document) {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(event_id = %document.id, error = %err, "skipping malformed event")
                }
            }
        }
        Ok(events)
    }

    /// Load the stored event and check the signed-in user organises it
    async fn owned_event(&self, event_id: &str) -> StoreResult<Event> {
        let uid = self.require_user_id()?;
        let document = self
            .backend
            .events()
            .get_by_id(event_id)
            .await?
            .ok_or_else(|| StoreError::EventNotFound(event_id.to_string()))?;
        let stored = Event::from_document(&document)?;
        if !stored.is_organised_by(&uid) {
            return Err(StoreError::NotOwner(event_id.to_string()));
        }
        Ok(stored)
    }

    /// Remove an auth account that never got its profile document
    async fn discard_account(&self, user: &AuthUser) {
        match self.backend.auth().delete_user().await {
            Ok(()) => tracing::info!(uid = %user.uid, "rolled back account without profile"),
            Err(err) => {
                tracing::error!(uid = %user.uid, error = %err, "could not roll back account without profile")
            }
        }
    }

    fn require_user_id(&self) -> StoreResult<String> {
        self.user_id().ok_or(StoreError::NotAuthenticated)
    }

    fn ensure_current_user(&self, user: &AuthUser) -> StoreResult<()> {
        let current = self.require_user_id()?;
        if current != user.uid {
            return Err(StoreError::UserMismatch {
                requested: user.uid.clone(),
                current,
            });
        }
        Ok(())
    }
}
